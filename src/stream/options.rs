use std::str::FromStr;

use super::{ConstructError, DelimiterPosition, InvalidOptionError};
use crate::handle::OpenMode;
use crate::record::{Options, UnknownFieldError, Value};

/// The open mode used when a stream is constructed from a path, e.g. `"r"` or `"w"`.
pub const MODE: &str = "mode";
/// The delimiter separating records, as a string or bytes.
pub const DELIMITER: &str = "delimiter";
/// Where a writer places the delimiter relative to each record: `"before"`, `"after"`,
/// `"between"` or `"around"`.
pub const DELIMITER_POSITION: &str = "delimiter_position";
/// Whether a CSV stream starts with a row of column names: `true`, `false` or a list of the names.
pub const HEADER: &str = "header";

/// Every option field that streams recognise.
pub const RECOGNISED_OPTIONS: [&str; 4] = [MODE, DELIMITER, DELIMITER_POSITION, HEADER];

/// The parsed form of the [`HEADER`] option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    /// There is a header row, but its column names aren't known in advance.
    Present,
    /// There is a header row with these column names.
    Columns(Vec<String>),
}

/// Returns an [`Options`] record declaring every option that streams recognise, with all of them
/// [`Unset`](crate::record::Value::Unset).
///
/// ```
/// use record_kit::stream::stream_options;
///
/// let mut options = stream_options();
/// options.set("mode", "r").unwrap();
/// assert!(options.set("mdoe", "r").is_err());
/// ```
pub fn stream_options() -> Options {
    Options::from_fields(RECOGNISED_OPTIONS)
}

/// The validated contents of an [`Options`] record provided to a stream constructor.
///
/// The record may declare any subset of the [recognised options](RECOGNISED_OPTIONS); fields that
/// are missing or [`Unset`](crate::record::Value::Unset) are treated as not provided.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamConfig {
    pub(crate) mode: Option<OpenMode>,
    pub(crate) delimiter: Option<Vec<u8>>,
    pub(crate) delimiter_position: Option<DelimiterPosition>,
    pub(crate) header: Option<Header>,
}

impl StreamConfig {
    pub fn from_options(options: &Options) -> Result<StreamConfig, ConstructError> {
        if let Some(unknown) = options.fields().find(|f| !RECOGNISED_OPTIONS.contains(f)) {
            Err(UnknownFieldError::new(unknown))?
        }

        let provided = |field: &str| options.get(field)
            .ok()
            .filter(|value| !value.is_unset());

        let mode = match provided(MODE) {
            Some(value) => Some(
                OpenMode::from_str(value.as_str().ok_or(invalid(MODE, "a mode string"))?)?
            ),
            None => None,
        };

        let delimiter = match provided(DELIMITER) {
            Some(value) => Some(
                value.as_bytes().ok_or(invalid(DELIMITER, "a string or bytes"))?.to_vec()
            ),
            None => None,
        };

        let delimiter_position = match provided(DELIMITER_POSITION) {
            Some(value) => Some(
                value.as_str()
                    .and_then(|s| DelimiterPosition::from_str(s).ok())
                    .ok_or(invalid(DELIMITER_POSITION, "one of before, after, between or around"))?
            ),
            None => None,
        };

        let header = match provided(HEADER) {
            Some(value) => parse_header(value)?,
            None => None,
        };

        Ok(StreamConfig {
            mode,
            delimiter,
            delimiter_position,
            header,
        })
    }

    pub const fn mode(&self) -> Option<&OpenMode> {
        self.mode.as_ref()
    }

    pub fn delimiter(&self) -> Option<&[u8]> {
        self.delimiter.as_deref()
    }

    pub const fn delimiter_position(&self) -> Option<DelimiterPosition> {
        self.delimiter_position
    }

    pub const fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }
}

fn parse_header(value: &Value) -> Result<Option<Header>, InvalidOptionError> {
    let error = || invalid(HEADER, "true, false or a list of column names");

    match value {
        Value::Bool(present) => Ok(present.then_some(Header::Present)),
        Value::List(columns) => {
            let columns = columns.iter()
                .map(|column| column.as_str().map(str::to_owned).ok_or_else(error))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Some(Header::Columns(columns)))
        },
        _ => Err(error()),
    }
}

pub(crate) const fn invalid(option: &'static str, expected: &'static str) -> InvalidOptionError {
    InvalidOptionError {
        option,
        expected,
    }
}
