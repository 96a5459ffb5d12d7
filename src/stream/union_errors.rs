use derive_more::{Display, Error, From, IsVariant};

use super::{
    ConstructError, DecodeError, DelimiterRequiredError, IncompatibleModeError, InvalidOptionError,
    ModeRequiredError, ReadRecordError, StreamClosedError, WriteRecordError,
};
use crate::handle::{CloseError, InvalidModeError, OpenError, ReadError, WriteError};
use crate::record::UnknownFieldError;

/// Every error that can occur over the lifetime of a stream, for callers that would rather use
/// `?` throughout than handle each operation's errors separately.
#[derive(Debug, Display, Clone, PartialEq, Eq, From, Error, IsVariant)]
pub enum StreamError {
    Close(CloseError),
    Closed(StreamClosedError),
    Decode(DecodeError),
    DelimiterRequired(DelimiterRequiredError),
    IncompatibleMode(IncompatibleModeError),
    InvalidMode(InvalidModeError),
    InvalidOption(InvalidOptionError),
    ModeRequired(ModeRequiredError),
    Open(OpenError),
    Read(ReadError),
    UnknownField(UnknownFieldError),
    Write(WriteError),
}

impl From<ConstructError> for StreamError {
    fn from(value: ConstructError) -> Self {
        match value {
            ConstructError::DelimiterRequired(e) => e.into(),
            ConstructError::IncompatibleMode(e) => e.into(),
            ConstructError::InvalidMode(e) => e.into(),
            ConstructError::InvalidOption(e) => e.into(),
            ConstructError::ModeRequired(e) => e.into(),
            ConstructError::Open(e) => e.into(),
            ConstructError::UnknownField(e) => e.into(),
        }
    }
}

impl From<ReadRecordError> for StreamError {
    fn from(value: ReadRecordError) -> Self {
        match value {
            ReadRecordError::Closed(e) => e.into(),
            ReadRecordError::Decode(e) => e.into(),
            ReadRecordError::Read(e) => e.into(),
        }
    }
}

impl From<WriteRecordError> for StreamError {
    fn from(value: WriteRecordError) -> Self {
        match value {
            WriteRecordError::Closed(e) => e.into(),
            WriteRecordError::Write(e) => e.into(),
        }
    }
}
