//! Record-oriented reading and writing.
//!
//! # Purpose
//! A [`RecordStream`] reads or writes a sequence of records over a [`Handle`](crate::handle::Handle),
//! splitting and joining them with a [`Codec`]. Streams are built from a [`Target`] and an
//! [`Options`](crate::record::Options) record, and come in the flavours named by the type aliases
//! below.
//!
//! # Method
//! The direction of a stream is part of its type, so a reader has no `write_record` and a writer
//! has no `read_record`. Who closes the handle is decided by how the stream was constructed: a
//! stream closes what it opened and nothing else.

mod access;
mod buffer;
mod codec;
mod error;
mod options;
mod quick;
mod reader;
mod stream;
mod table;
mod target;
mod union_errors;
mod writer;
mod tests;

pub use access::*;
pub use codec::*;
pub use error::*;
pub use options::*;
pub use quick::*;
pub use reader::*;
pub use stream::*;
pub use table::*;
pub use target::Target;
pub use union_errors::*;

/// Reads the whole remaining stream as raw bytes.
pub type Reader<'h, H> = RecordStream<'h, H, Bytes, Reading>;
/// Writes raw bytes.
pub type Writer<'h, H> = RecordStream<'h, H, Bytes, Writing>;
/// Reads text records separated by the `delimiter` option.
pub type RecordReader<'h, H> = RecordStream<'h, H, Delimited, Reading>;
/// Writes text records separated by the `delimiter` option.
pub type RecordWriter<'h, H> = RecordStream<'h, H, Delimited, Writing>;
pub type LineReader<'h, H> = RecordStream<'h, H, Lines, Reading>;
pub type LineWriter<'h, H> = RecordStream<'h, H, Lines, Writing>;
pub type ParagraphReader<'h, H> = RecordStream<'h, H, Paragraphs, Reading>;
pub type ParagraphWriter<'h, H> = RecordStream<'h, H, Paragraphs, Writing>;
/// Reads rows of comma-separated values, consuming the header row if the `header` option is set.
pub type CsvReader<'h, H> = RecordStream<'h, H, Csv, Reading>;
/// Writes rows of comma-separated values, starting with the `header` option's columns if given.
pub type CsvWriter<'h, H> = RecordStream<'h, H, Csv, Writing>;
