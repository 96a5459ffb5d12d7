use crate::handle::{Handle, READ_CHUNK, ReadError};

/// Bytes read ahead of the records that have been returned, providing the "read until delimiter"
/// primitive on top of [`Handle::read`].
#[derive(Debug, Default)]
pub(crate) struct ReadBuffer {
    pub(crate) bytes: Vec<u8>,
    pub(crate) eof: bool,
}

impl ReadBuffer {
    /// Reads another chunk from `handle` into the buffer, returning the number of bytes added.
    /// Reaching the end of the handle is remembered, and no further reads are attempted.
    pub fn fill<H: Handle>(&mut self, handle: &mut H) -> Result<usize, ReadError> {
        if self.eof {
            return Ok(0);
        }

        let start = self.bytes.len();
        self.bytes.resize(start + READ_CHUNK, 0);
        let result = handle.read(&mut self.bytes[start..]);
        let count = *result.as_ref().unwrap_or(&0);
        self.bytes.truncate(start + count);

        if result? == 0 {
            self.eof = true;
        }
        Ok(count)
    }

    /// Discards every leading occurrence of `filler`, reading more as long as the buffer holds
    /// nothing else.
    pub fn skip_leading<H: Handle>(&mut self, handle: &mut H, filler: u8) -> Result<(), ReadError> {
        loop {
            let skip = self.bytes.iter().take_while(|&&b| b == filler).count();
            self.bytes.drain(..skip);

            if !self.bytes.is_empty() || self.fill(handle)? == 0 {
                return Ok(());
            }
        }
    }

    /// Removes and returns the bytes up to and including the next `delimiter`, or everything that
    /// remains if the handle ends first. Returns None once the buffer and handle are both
    /// exhausted.
    ///
    /// An empty `delimiter` never matches, so everything that remains is returned.
    pub fn take_until<H: Handle>(
        &mut self,
        handle: &mut H,
        delimiter: &[u8],
    ) -> Result<Option<Vec<u8>>, ReadError> {
        if delimiter.is_empty() {
            return self.take_all(handle);
        }

        let mut searched = 0;
        loop {
            if let Some(pos) = find(&self.bytes[searched..], delimiter) {
                let end = searched + pos + delimiter.len();
                return Ok(Some(self.bytes.drain(..end).collect()));
            }

            // A delimiter could straddle the end of the buffer, so keep its tail for the next
            // search.
            searched = self.bytes.len().saturating_sub(delimiter.len() - 1);

            if self.fill(handle)? == 0 {
                return Ok(self.take_rest());
            }
        }
    }

    /// Removes and returns everything that remains in the handle.
    pub fn take_all<H: Handle>(&mut self, handle: &mut H) -> Result<Option<Vec<u8>>, ReadError> {
        while self.fill(handle)? != 0 {}
        Ok(self.take_rest())
    }

    /// Removes and returns up to `limit` bytes, reading more only if the buffer holds fewer.
    pub fn take_up_to<H: Handle>(&mut self, handle: &mut H, limit: usize) -> Result<Vec<u8>, ReadError> {
        while self.bytes.len() < limit && self.fill(handle)? != 0 {}
        let end = limit.min(self.bytes.len());
        Ok(self.bytes.drain(..end).collect())
    }

    fn take_rest(&mut self) -> Option<Vec<u8>> {
        if self.bytes.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.bytes))
        }
    }
}

/// Returns the index of the first occurrence of `needle` in `haystack`.
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|window| window == needle)
}
