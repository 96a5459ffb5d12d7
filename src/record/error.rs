use derive_more::{Display, Error};

/// A field was accessed or updated on a [`ClosedRecord`](super::ClosedRecord) which didn't
/// declare it at construction.
#[derive(Debug, Display, Clone, PartialEq, Eq, Error)]
#[display("unknown field: {field:?}")]
pub struct UnknownFieldError {
    pub field: String,
}

impl UnknownFieldError {
    pub fn new<F: Into<String>>(field: F) -> UnknownFieldError {
        UnknownFieldError {
            field: field.into(),
        }
    }
}
