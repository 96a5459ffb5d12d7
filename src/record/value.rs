use std::fmt::{self, Display, Formatter};

use derive_more::IsVariant;

use crate::util::fmt::DebugRaw;

/// A dynamically typed value, as stored in an [`Options`](super::Options) record.
///
/// The set of types is closed: values are converted into one of these variants with [`From`] and
/// read back with the `as_*` accessors, which return [`None`] when the variant doesn't match.
#[derive(Debug, Clone, Default, PartialEq, IsVariant)]
pub enum Value {
    /// No value has been provided. Declaring a field as Unset makes it available to be set later
    /// without giving it a meaningful default.
    #[default]
    Unset,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Bytes(Vec<u8>),
    List(Vec<Value>),
    /// A nested mapping, kept in the order provided. Nested mappings are opaque: they aren't
    /// subject to the fixed field set of the record holding them.
    Map(Vec<(String, Value)>),
}

impl Value {
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub const fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the raw bytes of either a [`Str`](Value::Str) or [`Bytes`](Value::Bytes) value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Str(s) => Some(s.as_bytes()),
            Value::Bytes(b) => Some(b.as_slice()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l.as_slice()),
            _ => None,
        }
    }

    /// Returns the value associated with `key` in a [`Map`](Value::Map), if there is one.
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(entries) => entries.iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

macro_rules! impl_value_from {
    ($($from:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$from> for Value {
                fn from(value: $from) -> Self {
                    Value::$variant(value.into())
                }
            }
        )+
    };
}

impl_value_from! {
    bool            => Bool,
    i32             => Int,
    i64             => Int,
    u32             => Int,
    f64             => Float,
    String          => Str,
    &str            => Str,
    Vec<u8>         => Bytes,
    &[u8]           => Bytes,
    Vec<Value>      => List,
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Unset
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(values: [T; N]) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Unset, Into::into)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Value::Map(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Value::Unset => write!(f, "unset"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::Bytes(b) => write!(f, "b\"{}\"", b.escape_ascii()),
            Value::List(l) => f.debug_list()
                .entries(l.iter().map(|v| DebugRaw(v.to_string())))
                .finish(),
            Value::Map(m) => f.debug_map()
                .entries(m.iter().map(|(k, v)| (k, DebugRaw(v.to_string()))))
                .finish(),
        }
    }
}
