//! The handles that streams read from and write to.
//!
//! A [`Handle`] is anything that can read and write bytes, such as an open file or an in-memory
//! buffer. Handles that can also be opened from a path implement [`Open`], allowing streams to
//! open (and later close) them internally.

mod error;
mod memory;
mod mode;

pub use error::*;
pub use memory::*;
pub use mode::*;

use std::path::Path;

/// Size of each read when a handle is read in chunks, such as when reading to the end.
pub(crate) const READ_CHUNK: usize = 8 * 1024;

/// A source and / or sink of bytes.
pub trait Handle {
    /// Reads up to `buf.len()` bytes into `buf`, returning how many were read. A return value of 0
    /// for a non-empty `buf` indicates the end of the handle.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ReadError>;

    /// Writes up to `buf.len()` bytes from `buf`, returning how many were written.
    fn write(&mut self, buf: &[u8]) -> Result<usize, WriteError>;

    /// Releases any resources held by the handle. Handles without anything to release can rely on
    /// the default implementation, which does nothing.
    fn close(self) -> Result<(), CloseError>
    where
        Self: Sized,
    {
        Ok(())
    }
}

/// A [`Handle`] that can be opened from a path.
pub trait Open: Handle + Sized {
    fn open(path: &Path, mode: &OpenMode) -> Result<Self, OpenError>;
}
