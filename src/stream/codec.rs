use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use super::{ConstructError, DecodeError, DelimiterRequiredError, InvalidOptionError, StreamConfig};
use crate::util::fmt::escape_bytes;

/// The strategy that splits a byte stream into records and joins records back into bytes.
///
/// A [`RecordStream`](super::RecordStream) reads raw records by scanning for the codec's
/// delimiter, passes them (delimiter included) to [`decode`](Codec::decode), and passes every
/// record it writes to [`encode`](Codec::encode).
pub trait Codec: Sized + Debug {
    /// The decoded form of a record.
    type Record;

    /// Builds the codec from the options provided to a stream constructor.
    fn from_config(config: &StreamConfig) -> Result<Self, ConstructError>;

    /// The byte sequence that terminates each record, or None if the whole stream is a single
    /// record. An empty delimiter is treated the same as None.
    fn delimiter(&self) -> Option<&[u8]>;

    /// A byte which is discarded whenever it occurs at the start of a record, allowing runs of
    /// separators to collapse into one.
    fn leading_filler(&self) -> Option<u8> {
        None
    }

    /// Returns false if `raw`, which ends in the delimiter, stops partway through a record, in which
    /// case the stream keeps reading up to the next delimiter. Used for formats that allow the
    /// delimiter inside quoted fields.
    fn is_complete(&self, _raw: &[u8]) -> bool {
        true
    }

    /// Converts a raw record, as read from the stream, into a record. Returns None if the codec
    /// consumed the raw record itself (such as a header row), in which case the stream moves on to
    /// the next one.
    fn decode(&mut self, raw: Vec<u8>) -> Result<Option<Self::Record>, DecodeError>;

    /// Appends the stored form of `record` to `out`. `first` is true for the first record written
    /// by the stream.
    fn encode(&self, record: &[u8], first: bool, out: &mut Vec<u8>);
}

/// Where a writer places the delimiter relative to each record it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DelimiterPosition {
    /// `|a|b`
    Before,
    /// `a|b|`
    After,
    /// `a|b`
    #[default]
    Between,
    /// `|a||b|`
    Around,
}

impl FromStr for DelimiterPosition {
    type Err = InvalidOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "before" => Ok(DelimiterPosition::Before),
            "after" => Ok(DelimiterPosition::After),
            "between" => Ok(DelimiterPosition::Between),
            "around" => Ok(DelimiterPosition::Around),
            _ => Err(InvalidOptionError {
                option: super::DELIMITER_POSITION,
                expected: "one of before, after, between or around",
            }),
        }
    }
}

impl Display for DelimiterPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", match self {
            DelimiterPosition::Before => "before",
            DelimiterPosition::After => "after",
            DelimiterPosition::Between => "between",
            DelimiterPosition::Around => "around",
        })
    }
}

pub(crate) fn decode_utf8(raw: Vec<u8>) -> Result<String, DecodeError> {
    String::from_utf8(raw).map_err(|e| DecodeError {
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}

/// Treats the entire stream as raw bytes: reading returns everything that remains as one record,
/// and writing passes bytes through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bytes;

impl Codec for Bytes {
    type Record = Vec<u8>;

    fn from_config(_: &StreamConfig) -> Result<Self, ConstructError> {
        Ok(Bytes)
    }

    fn delimiter(&self) -> Option<&[u8]> {
        None
    }

    fn decode(&mut self, raw: Vec<u8>) -> Result<Option<Self::Record>, DecodeError> {
        Ok(Some(raw))
    }

    fn encode(&self, record: &[u8], _: bool, out: &mut Vec<u8>) {
        out.extend_from_slice(record);
    }
}

/// Text records separated by an arbitrary, caller-provided delimiter.
///
/// Decoding removes one trailing delimiter, if present: the final record of a stream keeps
/// whatever follows the last delimiter, including any line terminator. Encoding places the
/// delimiter according to the [`DelimiterPosition`], which defaults to
/// [`Between`](DelimiterPosition::Between).
#[derive(Clone, PartialEq, Eq)]
pub struct Delimited {
    pub(crate) delimiter: Vec<u8>,
    pub(crate) position: DelimiterPosition,
}

impl Delimited {
    pub fn new<D: Into<Vec<u8>>>(delimiter: D, position: DelimiterPosition) -> Result<Delimited, DelimiterRequiredError> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            Err(DelimiterRequiredError)?
        }
        Ok(Delimited {
            delimiter,
            position,
        })
    }

    pub const fn position(&self) -> DelimiterPosition {
        self.position
    }
}

impl Codec for Delimited {
    type Record = String;

    fn from_config(config: &StreamConfig) -> Result<Self, ConstructError> {
        let delimiter = config.delimiter().ok_or(DelimiterRequiredError)?;
        let position = config.delimiter_position().unwrap_or_default();
        Ok(Delimited::new(delimiter, position)?)
    }

    fn delimiter(&self) -> Option<&[u8]> {
        Some(&self.delimiter)
    }

    fn decode(&mut self, mut raw: Vec<u8>) -> Result<Option<Self::Record>, DecodeError> {
        if raw.ends_with(&self.delimiter) {
            raw.truncate(raw.len() - self.delimiter.len());
        }
        decode_utf8(raw).map(Some)
    }

    fn encode(&self, record: &[u8], first: bool, out: &mut Vec<u8>) {
        let (before, after) = match self.position {
            DelimiterPosition::Before => (true, false),
            DelimiterPosition::After => (false, true),
            DelimiterPosition::Between => (!first, false),
            DelimiterPosition::Around => (true, true),
        };

        if before {
            out.extend_from_slice(&self.delimiter);
        }
        out.extend_from_slice(record);
        if after {
            out.extend_from_slice(&self.delimiter);
        }
    }
}

impl Debug for Delimited {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Delimited")
            .field("delimiter", &escape_bytes(&self.delimiter))
            .field("position", &self.position)
            .finish()
    }
}

/// Lines of text terminated by `\n`.
///
/// Decoding removes the terminator along with a preceding `\r`, so files with `\r\n` endings read
/// the same. Encoding always appends `\n`. Lines ignore the `delimiter` option.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lines;

impl Lines {
    pub const TERMINATOR: &'static [u8] = b"\n";
}

impl Codec for Lines {
    type Record = String;

    fn from_config(_: &StreamConfig) -> Result<Self, ConstructError> {
        Ok(Lines)
    }

    fn delimiter(&self) -> Option<&[u8]> {
        Some(Lines::TERMINATOR)
    }

    fn decode(&mut self, mut raw: Vec<u8>) -> Result<Option<Self::Record>, DecodeError> {
        if raw.ends_with(b"\n") {
            raw.pop();
            if raw.ends_with(b"\r") {
                raw.pop();
            }
        }
        decode_utf8(raw).map(Some)
    }

    fn encode(&self, record: &[u8], _: bool, out: &mut Vec<u8>) {
        out.extend_from_slice(record);
        out.extend_from_slice(Lines::TERMINATOR);
    }
}

/// Paragraphs of text separated by blank lines.
///
/// Any run of blank lines counts as a single separator, and blank lines at the start of the
/// stream are skipped. Decoding removes all trailing newlines from a paragraph, while encoding
/// appends a line terminator and one blank line. Paragraphs ignore the `delimiter` option.
#[derive(Debug, Clone, Copy, Default)]
pub struct Paragraphs;

impl Paragraphs {
    pub const SEPARATOR: &'static [u8] = b"\n\n";
}

impl Codec for Paragraphs {
    type Record = String;

    fn from_config(_: &StreamConfig) -> Result<Self, ConstructError> {
        Ok(Paragraphs)
    }

    fn delimiter(&self) -> Option<&[u8]> {
        Some(Paragraphs::SEPARATOR)
    }

    fn leading_filler(&self) -> Option<u8> {
        Some(b'\n')
    }

    fn decode(&mut self, mut raw: Vec<u8>) -> Result<Option<Self::Record>, DecodeError> {
        while raw.last() == Some(&b'\n') {
            raw.pop();
        }
        decode_utf8(raw).map(Some)
    }

    fn encode(&self, record: &[u8], _: bool, out: &mut Vec<u8>) {
        out.extend_from_slice(record);
        out.extend_from_slice(Paragraphs::SEPARATOR);
    }
}
