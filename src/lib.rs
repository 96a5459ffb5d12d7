//! Closed-field records and record-oriented streams.
//!
//! # Purpose
//! Two small pieces that keep turning up in scripts and tools: passing options around without
//! silently accepting misspelled names, and reading or writing files one record at a time without
//! forgetting to close what was opened.
//!
//! - [`record::ClosedRecord`] is a map whose set of fields is frozen when it is built. Reading or
//!   writing a field that wasn't declared is an error, not a silent insertion, so
//!   `overwrite_date` can't stand in for `overwrite_data` without anyone noticing.
//! - [`stream::RecordStream`] reads or writes delimited records (raw bytes, delimited text, lines,
//!   paragraphs) over a handle that is either opened from a path (and closed by the stream) or
//!   supplied by the caller (and left open).
//!
//! # Example
//! ```no_run
//! use record_kit::fs::File;
//! use record_kit::record;
//! use record_kit::stream::{LineReader, StreamError};
//!
//! let options = record! { "mode" => "r" };
//! let lines = LineReader::<File>::with("notes.txt", &options, |reader| {
//!     Ok::<_, StreamError>(reader.read_all_records()?)
//! })?;
//! # Ok::<(), StreamError>(())
//! ```
//!
//! # Error Handling
//! Errors are strongly typed. Each operation returns an enum of exactly the failures it can
//! produce, built from small (mostly zero-sized) structs that implement
//! [`Error`](std::error::Error). [`stream::StreamError`] unifies the stream errors for callers
//! that just want to use `?` everywhere.
//!
//! Panics are reserved for states that indicate memory or descriptor corruption, such as the OS
//! reporting a bad file descriptor for a descriptor this crate owns.
//!
//! # Dependencies
//! The [`fs`] module relies on `libc` for its thin syscall wrappers and is only available on Linux
//! with the `fs` feature (enabled by default). Without it, streams still work over any type that
//! implements [`handle::Handle`].
//!
//! [`stream::Csv`] parses and formats rows with the `csv` crate.
//!
//! Logging goes through the `log` facade; nothing is printed unless the application installs a
//! logger.
#![warn(clippy::missing_safety_doc)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::missing_const_for_fn)]
#![warn(clippy::missing_panics_doc)]
#![warn(clippy::unwrap_used)]
#![allow(clippy::module_inception)]

pub mod handle;
pub mod record;
pub mod stream;

#[cfg(feature = "fs")]
pub mod fs;

pub(crate) mod util;
