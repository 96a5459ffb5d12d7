use std::collections::HashMap;
use std::fmt::{self, Debug, Display, Formatter};
use std::slice;

use super::{UnknownFieldError, Value};
use crate::util::fmt::DebugRaw;

/// A record with a set of fields which is fixed when it is constructed.
///
/// ClosedRecords are intended for options and configuration, where an open map would silently
/// accept a misspelled key. Every field is declared at construction and exists for the lifetime of
/// the record: values can be replaced, but fields can never be added or removed. Accessing or
/// setting a field that wasn't declared returns an [`UnknownFieldError`].
///
/// Fields remember the order that they were declared in, which is used for iteration and
/// formatting. Equality ignores this order.
///
/// Values are stored opaquely. A nested mapping stored as a value (e.g. [`Value::Map`]) is not
/// promoted to a nested ClosedRecord and isn't subject to any schema.
///
/// # Time Complexity
/// For this analysis of time complexity, variables are defined as follows:
/// - `n`: The number of fields in the ClosedRecord.
/// - `m`: The number of entries provided to an update.
///
/// | Method | Complexity |
/// |-|-|
/// | `len` | `O(1)` |
/// | `get` | `O(1)`* |
/// | `set` | `O(1)`* |
/// | `update` | `O(m)`* |
/// | `eq` | `O(n)`* |
///
/// \* Field lookup hashes the field name.
#[derive(Clone)]
pub struct ClosedRecord<V = Value> {
    pub(crate) entries: Vec<(Box<str>, V)>,
    pub(crate) index: HashMap<Box<str>, usize>,
}

impl<V> ClosedRecord<V> {
    /// Creates a ClosedRecord declaring every field in `mapping`, with its associated value.
    ///
    /// If a field name is repeated, the last value provided for it is kept, in the position of the
    /// first occurrence.
    pub fn new<I, K>(mapping: I) -> ClosedRecord<V>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        let mapping = mapping.into_iter();
        let mut record = ClosedRecord {
            entries: Vec::with_capacity(mapping.size_hint().0),
            index: HashMap::with_capacity(mapping.size_hint().0),
        };

        for (field, value) in mapping {
            let field: Box<str> = field.into().into_boxed_str();
            match record.index.get(&field) {
                Some(&i) => record.entries[i].1 = value,
                None => {
                    record.index.insert(field.clone(), record.entries.len());
                    record.entries.push((field, value));
                },
            }
        }

        record
    }

    /// Creates a ClosedRecord with no fields. Every access to it will fail.
    pub fn empty() -> ClosedRecord<V> {
        ClosedRecord {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Returns the number of fields declared by the record.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the record declares no fields.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `field` was declared when the record was constructed.
    pub fn contains(&self, field: &str) -> bool {
        self.index.contains_key(field)
    }

    /// Returns a reference to the current value of `field`.
    pub fn get(&self, field: &str) -> Result<&V, UnknownFieldError> {
        let index = self.index_of(field)?;
        Ok(&self.entries[index].1)
    }

    /// Returns a mutable reference to the current value of `field`.
    pub fn get_mut(&mut self, field: &str) -> Result<&mut V, UnknownFieldError> {
        let index = self.index_of(field)?;
        Ok(&mut self.entries[index].1)
    }

    /// Replaces the value of `field`, returning the record so that calls can be chained.
    ///
    /// ```
    /// use record_kit::record;
    ///
    /// let mut options = record! { "overwrite_data" => true };
    /// assert!(options.set("overwrite_data", false).is_ok());
    /// assert!(options.set("overwrite_date", false).is_err());
    /// ```
    pub fn set<T: Into<V>>(&mut self, field: &str, value: T) -> Result<&mut Self, UnknownFieldError> {
        *self.get_mut(field)? = value.into();
        Ok(self)
    }

    /// Replaces the values of every field in `mapping`.
    ///
    /// The update is all-or-nothing: every field name is checked before any value is written, so
    /// if `mapping` contains an undeclared field, the record is left untouched.
    pub fn update<I, K, T>(&mut self, mapping: I) -> Result<&mut Self, UnknownFieldError>
    where
        I: IntoIterator<Item = (K, T)>,
        K: AsRef<str>,
        T: Into<V>,
    {
        let resolved = mapping.into_iter()
            .map(|(field, value)| Ok((self.index_of(field.as_ref())?, value)))
            .collect::<Result<Vec<_>, UnknownFieldError>>()?;

        for (index, value) in resolved {
            self.entries[index].1 = value.into();
        }
        Ok(self)
    }

    /// Consumes the record and returns it with the values in `mapping` applied, following the
    /// same rules as [`update`](ClosedRecord::update). This is useful for overriding a set of
    /// defaults:
    ///
    /// ```
    /// use record_kit::record;
    ///
    /// let options = record! { "overwrite_data" => true, "message" => "foo" }
    ///     .updated([("message", "bar")])
    ///     .unwrap();
    /// assert_eq!(options.get("message").unwrap().as_str(), Some("bar"));
    /// ```
    pub fn updated<I, K, T>(mut self, mapping: I) -> Result<Self, UnknownFieldError>
    where
        I: IntoIterator<Item = (K, T)>,
        K: AsRef<str>,
        T: Into<V>,
    {
        self.update(mapping)?;
        Ok(self)
    }

    /// Returns an iterator over the declared field names, in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(field, _)| &**field)
    }

    /// Returns an iterator over the current values, in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Returns an iterator over all field-value pairs, in declaration order.
    pub fn iter(&self) -> Iter<'_, V> {
        self.into_iter()
    }

    pub(crate) fn index_of(&self, field: &str) -> Result<usize, UnknownFieldError> {
        self.index.get(field)
            .copied()
            .ok_or_else(|| UnknownFieldError::new(field))
    }
}

impl<V: Default> ClosedRecord<V> {
    /// Creates a ClosedRecord declaring each of the provided `fields`, with default values.
    pub fn from_fields<I, K>(fields: I) -> ClosedRecord<V>
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        ClosedRecord::new(fields.into_iter().map(|field| (field, V::default())))
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for ClosedRecord<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ClosedRecord::new(iter)
    }
}

impl<V> Default for ClosedRecord<V> {
    fn default() -> Self {
        ClosedRecord::empty()
    }
}

impl<V: PartialEq> PartialEq for ClosedRecord<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self.iter().all(|(field, value)| other.get(field).is_ok_and(|o| o == value))
    }
}

impl<V: Eq> Eq for ClosedRecord<V> {}

/// An iterator over the field-value pairs of a [`ClosedRecord`].
pub struct Iter<'a, V>(slice::Iter<'a, (Box<str>, V)>);

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(field, value)| (&**field, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<'a, V> IntoIterator for &'a ClosedRecord<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        Iter(self.entries.iter())
    }
}

impl<V: Debug> Debug for ClosedRecord<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "ClosedRecord ")?;
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: Display> Display for ClosedRecord<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "#")?;
        f.debug_map()
            .entries(self.iter().map(|(field, value)| (field, DebugRaw(value.to_string()))))
            .finish()
    }
}
