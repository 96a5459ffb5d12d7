use derive_more::{Display, Error, From, IsVariant};

use crate::handle::{InvalidModeError, OpenError, OpenMode, ReadError, WriteError};
use crate::record::UnknownFieldError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("stream has already been finished")]
pub struct StreamClosedError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("a mode is required when opening a stream from a path")]
pub struct ModeRequiredError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("a non-empty delimiter is required for delimited records")]
pub struct DelimiterRequiredError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("mode \"{mode}\" does not allow {access}")]
pub struct IncompatibleModeError {
    pub mode: OpenMode,
    pub access: &'static str,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("invalid value for option {option:?}, expected {expected}")]
pub struct InvalidOptionError {
    pub option: &'static str,
    pub expected: &'static str,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("record is not valid UTF-8 after {valid_up_to} bytes")]
pub struct DecodeError {
    pub valid_up_to: usize,
}

/// Errors produced while constructing a stream, before any records are read or written.
#[derive(Debug, Display, Clone, PartialEq, Eq, From, Error, IsVariant)]
pub enum ConstructError {
    DelimiterRequired(DelimiterRequiredError),
    IncompatibleMode(IncompatibleModeError),
    InvalidMode(InvalidModeError),
    InvalidOption(InvalidOptionError),
    ModeRequired(ModeRequiredError),
    Open(OpenError),
    UnknownField(UnknownFieldError),
}

#[derive(Debug, Display, Clone, PartialEq, Eq, From, Error, IsVariant)]
pub enum ReadRecordError {
    Closed(StreamClosedError),
    Decode(DecodeError),
    Read(ReadError),
}

#[derive(Debug, Display, Clone, PartialEq, Eq, From, Error, IsVariant)]
pub enum WriteRecordError {
    Closed(StreamClosedError),
    Write(WriteError),
}
