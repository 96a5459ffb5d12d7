use std::fmt::{self, Debug, Formatter};

use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};

use super::codec::decode_utf8;
use super::options::invalid;
use super::{
    Codec, ConstructError, DELIMITER, DecodeError, HEADER, Header, InvalidOptionError, ReadRecordError,
    Reading, RecordStream, StreamConfig, WriteRecordError, Writing,
};
use crate::handle::{Handle, IOError, WriteError};
use crate::util::fmt::escape_bytes;

/// Rows of comma-separated values, as described by RFC 4180.
///
/// Each record is a row of fields, terminated by `\n` (or `\r\n` when reading). Fields containing
/// the separator, quotes or line breaks are quoted, so a single row may span several lines. The
/// separator defaults to `,` and can be replaced with any single byte through the `delimiter`
/// option. Blank lines are skipped when reading.
///
/// # Header
/// The `header` option declares that the first row holds column names. Readers consume that row
/// rather than returning it, and expose it through [`Csv::header`]. Writers given a list of column
/// names write them as a row ahead of the first record.
#[derive(Clone, PartialEq, Eq)]
pub struct Csv {
    pub(crate) separator: u8,
    pub(crate) header: Option<Header>,
    pub(crate) header_pending: bool,
    pub(crate) encoded_header: Option<Vec<u8>>,
}

impl Csv {
    pub const TERMINATOR: &'static [u8] = b"\n";
    pub const DEFAULT_SEPARATOR: u8 = b',';

    pub fn new(separator: u8, header: Option<Header>) -> Result<Csv, InvalidOptionError> {
        let encoded_header = match &header {
            Some(Header::Columns(columns)) => Some(
                format_row(separator, columns)
                    .map_err(|_| invalid(HEADER, "a list of column names"))?,
            ),
            _ => None,
        };

        Ok(Csv {
            separator,
            header_pending: header.is_some(),
            header,
            encoded_header,
        })
    }

    pub const fn separator(&self) -> u8 {
        self.separator
    }

    /// Returns the column names, once they are known: either provided through the `header`
    /// option, or read from the first row of the stream.
    pub fn header(&self) -> Option<&[String]> {
        match &self.header {
            Some(Header::Columns(columns)) => Some(columns),
            _ => None,
        }
    }

    /// Formats `fields` as a single row, terminator included.
    pub fn format_row<I, F>(&self, fields: I) -> Result<Vec<u8>, csv::Error>
    where
        I: IntoIterator<Item = F>,
        F: AsRef<[u8]>,
    {
        format_row(self.separator, fields)
    }
}

fn format_row<I, F>(separator: u8, fields: I) -> Result<Vec<u8>, csv::Error>
where
    I: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .delimiter(separator)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(fields)?;
    writer.into_inner().map_err(|e| e.into_error().into())
}

impl Codec for Csv {
    type Record = Vec<String>;

    fn from_config(config: &StreamConfig) -> Result<Self, ConstructError> {
        let separator = match config.delimiter() {
            None => Csv::DEFAULT_SEPARATOR,
            Some(&[separator]) => separator,
            Some(_) => Err(invalid(DELIMITER, "a single byte separator"))?,
        };
        Ok(Csv::new(separator, config.header().cloned())?)
    }

    fn delimiter(&self) -> Option<&[u8]> {
        Some(Csv::TERMINATOR)
    }

    /// An odd number of quotes means the row ends inside a quoted field. Escaped quotes are
    /// doubled, so they don't affect the count.
    fn is_complete(&self, raw: &[u8]) -> bool {
        raw.iter().filter(|&&b| b == b'"').count() % 2 == 0
    }

    fn decode(&mut self, raw: Vec<u8>) -> Result<Option<Self::Record>, DecodeError> {
        let row = decode_utf8(raw)?;
        let mut reader = ReaderBuilder::new()
            .delimiter(self.separator)
            .has_headers(false)
            .flexible(true)
            .from_reader(row.as_bytes());

        let mut record = StringRecord::new();
        match reader.read_record(&mut record) {
            Ok(true) => (),
            Ok(false) => return Ok(None),
            Err(e) => Err(DecodeError {
                valid_up_to: e.position().map_or(0, |p| p.byte() as usize),
            })?,
        }
        let fields: Vec<String> = record.iter().map(str::to_owned).collect();

        if self.header_pending {
            self.header_pending = false;
            self.header = Some(Header::Columns(fields));
            return Ok(None);
        }
        Ok(Some(fields))
    }

    /// Expects `record` to be a row formatted by [`Csv::format_row`], which is written as-is. The
    /// header row, if there is one, is written ahead of the first record.
    fn encode(&self, record: &[u8], first: bool, out: &mut Vec<u8>) {
        if first {
            if let Some(header) = &self.encoded_header {
                out.extend_from_slice(header);
            }
        }
        out.extend_from_slice(record);
    }
}

impl Debug for Csv {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Csv")
            .field("separator", &escape_bytes(&[self.separator]))
            .field("header", &self.header)
            .finish()
    }
}

impl<H: Handle> RecordStream<'_, H, Csv, Reading> {
    pub fn read_row(&mut self) -> Result<Option<Vec<String>>, ReadRecordError> {
        self.read_record()
    }

    pub fn read_all_rows(&mut self) -> Result<Vec<Vec<String>>, ReadRecordError> {
        self.read_all_records()
    }

    /// Returns the column names, reading the header row first if it hasn't been read yet. Returns
    /// None if the `header` option wasn't set.
    pub fn read_header(&mut self) -> Result<Option<&[String]>, ReadRecordError> {
        // Until the header is read, decoding consumes rows without returning them.
        while self.codec.header_pending {
            let Some(raw) = self.read_raw_record()? else {
                break;
            };
            self.codec.decode(raw)?;
        }
        Ok(self.codec.header())
    }
}

impl<H: Handle> RecordStream<'_, H, Csv, Writing> {
    /// Formats `fields` as a row and writes it as a single record.
    pub fn write_row<I, F>(&mut self, fields: I) -> Result<(), WriteRecordError>
    where
        I: IntoIterator<Item = F>,
        F: AsRef<[u8]>,
    {
        // Formatting goes into memory, so the only possible failure is an I/O one.
        let row = self.codec.format_row(fields).map_err(|_| WriteError::from(IOError))?;
        self.write_record(row)
    }

    /// Writes each row in turn, stopping at the first error.
    pub fn write_rows<R, I, F>(&mut self, rows: R) -> Result<(), WriteRecordError>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = F>,
        F: AsRef<[u8]>,
    {
        for row in rows {
            self.write_row(row)?;
        }
        Ok(())
    }
}
