use super::{Handle, ReadError, WriteError};

/// An in-memory [`Handle`] over a growable byte buffer, with a cursor shared by reads and writes.
///
/// Writing at the cursor overwrites existing bytes and extends the buffer once the end is
/// reached, as a file opened with `r+` would.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryHandle {
    pub(crate) bytes: Vec<u8>,
    pub(crate) pos: usize,
}

impl MemoryHandle {
    /// Creates an empty MemoryHandle.
    pub const fn new() -> MemoryHandle {
        MemoryHandle {
            bytes: Vec::new(),
            pos: 0,
        }
    }

    /// Returns all bytes held, regardless of the cursor position.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the contents as a string, if they are valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }

    /// Returns the position of the cursor.
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor back to the start, so that written data can be read back.
    pub fn rewind(&mut self) {
        self.pos = 0;
    }

    /// Consumes the handle and returns the underlying buffer.
    pub fn into_inner(self) -> Vec<u8> {
        self.bytes
    }
}

impl Handle for MemoryHandle {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ReadError> {
        let remaining = self.bytes.get(self.pos..).unwrap_or_default();
        let count = remaining.len().min(buf.len());
        buf[..count].copy_from_slice(&remaining[..count]);
        self.pos += count;
        Ok(count)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, WriteError> {
        let overlap = self.bytes.len().saturating_sub(self.pos).min(buf.len());
        self.bytes[self.pos..self.pos + overlap].copy_from_slice(&buf[..overlap]);
        self.bytes.extend_from_slice(&buf[overlap..]);
        self.pos += buf.len();
        Ok(buf.len())
    }
}

impl From<Vec<u8>> for MemoryHandle {
    fn from(bytes: Vec<u8>) -> Self {
        MemoryHandle {
            bytes,
            pos: 0,
        }
    }
}

impl From<&[u8]> for MemoryHandle {
    fn from(bytes: &[u8]) -> Self {
        MemoryHandle::from(bytes.to_vec())
    }
}

impl From<&str> for MemoryHandle {
    fn from(text: &str) -> Self {
        MemoryHandle::from(text.as_bytes())
    }
}
