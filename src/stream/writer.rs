use super::{Codec, Lines, Paragraphs, RecordStream, Writable, WriteRecordError, Writing};
use crate::handle::{Handle, IOError, WriteError};

impl<'h, H: Handle, C: Codec, A: Writable> RecordStream<'h, H, C, A> {
    /// Encodes and writes a single record.
    pub fn write_record<R: AsRef<[u8]>>(&mut self, record: R) -> Result<(), WriteRecordError> {
        let mut encoded = Vec::new();
        self.codec.encode(record.as_ref(), self.count == 0, &mut encoded);
        self.write_all(&encoded)?;

        self.count += 1;
        log::trace!("wrote record {}", self.count);
        Ok(())
    }

    /// Writes each record in turn, stopping at the first error.
    pub fn write_records<I, R>(&mut self, records: I) -> Result<(), WriteRecordError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Writes raw bytes, bypassing the codec. This doesn't count as a record, so it has no effect
    /// on delimiter placement.
    pub fn write<B: AsRef<[u8]>>(&mut self, bytes: B) -> Result<(), WriteRecordError> {
        self.write_all(bytes.as_ref())
    }

    fn write_all(&mut self, mut bytes: &[u8]) -> Result<(), WriteRecordError> {
        let handle = self.handle_or_closed()?;
        while !bytes.is_empty() {
            match handle.write(bytes)? {
                0 => return Err(WriteError::from(IOError).into()),
                written => bytes = &bytes[written..],
            }
        }
        Ok(())
    }
}

impl<H: Handle> RecordStream<'_, H, Lines, Writing> {
    pub fn write_line<R: AsRef<[u8]>>(&mut self, line: R) -> Result<(), WriteRecordError> {
        self.write_record(line)
    }

    pub fn write_lines<I, R>(&mut self, lines: I) -> Result<(), WriteRecordError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        self.write_records(lines)
    }
}

impl<H: Handle> RecordStream<'_, H, Paragraphs, Writing> {
    pub fn write_paragraph<R: AsRef<[u8]>>(&mut self, paragraph: R) -> Result<(), WriteRecordError> {
        self.write_record(paragraph)
    }

    pub fn write_paragraphs<I, R>(&mut self, paragraphs: I) -> Result<(), WriteRecordError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        self.write_records(paragraphs)
    }
}
