//! Records with a field set that is fixed at construction.

mod closed_record;
mod error;
mod macros;
mod tests;
mod value;

pub use closed_record::*;
pub use error::*;
pub use value::*;

/// The option record accepted by this crate's constructors: a [`ClosedRecord`] of dynamically
/// typed [`Value`]s.
pub type Options = ClosedRecord<Value>;
