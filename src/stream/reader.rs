use std::iter::FusedIterator;

use super::{Codec, Lines, Paragraphs, ReadRecordError, Readable, Reading, RecordStream, StreamClosedError};
use crate::handle::Handle;

impl<'h, H: Handle, C: Codec, A: Readable> RecordStream<'h, H, C, A> {
    /// Reads and decodes the next record, or returns None at the end of the stream.
    pub fn read_record(&mut self) -> Result<Option<C::Record>, ReadRecordError> {
        while let Some(raw) = self.read_raw_record()? {
            if let Some(record) = self.codec.decode(raw)? {
                self.count += 1;
                log::trace!("read record {}", self.count);
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Reads every remaining record, in order.
    pub fn read_all_records(&mut self) -> Result<Vec<C::Record>, ReadRecordError> {
        self.records().collect()
    }

    /// Passes every remaining record to `visitor`, in order, without collecting them.
    pub fn read_each<F: FnMut(C::Record)>(&mut self, mut visitor: F) -> Result<(), ReadRecordError> {
        while let Some(record) = self.read_record()? {
            visitor(record);
        }
        Ok(())
    }

    /// Returns an iterator which reads the remaining records one at a time. The iterator ends
    /// after the last record or the first error.
    pub fn records(&mut self) -> Records<'_, 'h, H, C, A> {
        Records {
            stream: self,
            done: false,
        }
    }

    /// Reads raw bytes, bypassing the codec: up to `limit` bytes if provided, otherwise everything
    /// that remains. Bytes already buffered by earlier record reads are returned first.
    pub fn read(&mut self, limit: Option<usize>) -> Result<Vec<u8>, ReadRecordError> {
        let handle = self.slot.handle_mut().ok_or(StreamClosedError)?;

        Ok(match limit {
            Some(limit) => self.buffer.take_up_to(handle, limit)?,
            None => self.buffer.take_all(handle)?.unwrap_or_default(),
        })
    }

    /// Reads the bytes of the next record, delimiter included, extending it over further
    /// delimiters for as long as the codec reports it incomplete.
    pub(crate) fn read_raw_record(&mut self) -> Result<Option<Vec<u8>>, ReadRecordError> {
        let handle = self.slot.handle_mut().ok_or(StreamClosedError)?;

        if let Some(filler) = self.codec.leading_filler() {
            self.buffer.skip_leading(handle, filler)?;
        }

        let Some(delimiter) = self.codec.delimiter() else {
            return Ok(self.buffer.take_all(handle)?);
        };
        let Some(mut raw) = self.buffer.take_until(handle, delimiter)? else {
            return Ok(None);
        };

        while !self.codec.is_complete(&raw) {
            match self.buffer.take_until(handle, delimiter)? {
                Some(more) => raw.extend(more),
                None => break,
            }
        }
        Ok(Some(raw))
    }
}

impl<H: Handle> RecordStream<'_, H, Lines, Reading> {
    pub fn read_line(&mut self) -> Result<Option<String>, ReadRecordError> {
        self.read_record()
    }

    pub fn read_all_lines(&mut self) -> Result<Vec<String>, ReadRecordError> {
        self.read_all_records()
    }
}

impl<H: Handle> RecordStream<'_, H, Paragraphs, Reading> {
    pub fn read_paragraph(&mut self) -> Result<Option<String>, ReadRecordError> {
        self.read_record()
    }

    pub fn read_all_paragraphs(&mut self) -> Result<Vec<String>, ReadRecordError> {
        self.read_all_records()
    }
}

/// An iterator over the records of a readable [`RecordStream`], created by
/// [`RecordStream::records`].
pub struct Records<'s, 'h, H: Handle, C: Codec, A: Readable> {
    stream: &'s mut RecordStream<'h, H, C, A>,
    done: bool,
}

impl<H: Handle, C: Codec, A: Readable> Iterator for Records<'_, '_, H, C, A> {
    type Item = Result<C::Record, ReadRecordError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let next = self.stream.read_record().transpose();
        if !matches!(next, Some(Ok(_))) {
            self.done = true;
        }
        next
    }
}

impl<H: Handle, C: Codec, A: Readable> FusedIterator for Records<'_, '_, H, C, A> {}
