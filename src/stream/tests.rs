#![cfg(test)]

use std::cell::Cell;
use std::path::Path;

use super::*;
use crate::handle::{
    CloseError, Handle, IOError, InvalidModeError, MemoryHandle, MissingComponentError, Open,
    OpenError, OpenMode, READ_CHUNK, ReadError, WriteError,
};
use crate::record;
use crate::record::{Options, UnknownFieldError};
use crate::util::panic::assert_panics;

thread_local! {
    static CLOSES: Cell<usize> = const { Cell::new(0) };
}

/// A handle that counts how many times it has been closed on the current thread. Opening the path
/// `"missing"` fails, and a handle opened from `"fail-close"` fails when closed.
#[derive(Debug)]
struct TrackedHandle {
    inner: MemoryHandle,
    fail_close: bool,
}

impl TrackedHandle {
    fn with_records() -> TrackedHandle {
        TrackedHandle {
            inner: MemoryHandle::from("r1\nr2\nr3\n"),
            fail_close: false,
        }
    }

    fn closes() -> usize {
        CLOSES.with(Cell::get)
    }
}

impl Handle for TrackedHandle {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ReadError> {
        self.inner.read(buf)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, WriteError> {
        self.inner.write(buf)
    }

    fn close(self) -> Result<(), CloseError> {
        CLOSES.with(|closes| closes.set(closes.get() + 1));
        if self.fail_close {
            Err(IOError)?
        }
        Ok(())
    }
}

impl Open for TrackedHandle {
    fn open(path: &Path, _: &OpenMode) -> Result<Self, OpenError> {
        match path.to_str() {
            Some("missing") => Err(MissingComponentError.into()),
            Some("fail-close") => Ok(TrackedHandle {
                fail_close: true,
                ..TrackedHandle::with_records()
            }),
            _ => Ok(TrackedHandle::with_records()),
        }
    }
}

/// Accepts at most one byte per write.
struct TrickleHandle(Vec<u8>);

impl Handle for TrickleHandle {
    fn read(&mut self, _: &mut [u8]) -> Result<usize, ReadError> {
        Ok(0)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, WriteError> {
        self.0.extend(buf.first());
        Ok(buf.len().min(1))
    }
}

/// Never accepts any bytes.
struct StuckHandle;

impl Handle for StuckHandle {
    fn read(&mut self, _: &mut [u8]) -> Result<usize, ReadError> {
        Ok(0)
    }

    fn write(&mut self, _: &[u8]) -> Result<usize, WriteError> {
        Ok(0)
    }
}

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn read_mode() -> Options {
    record! { "mode" => "r" }
}

#[test]
fn test_read_all_records_in_order() {
    init_logging();
    let mut reader = LineReader::<TrackedHandle>::new("records", &read_mode())
        .expect("opening a tracked handle should succeed");

    assert!(reader.is_owned());
    assert_eq!(reader.read_all_records(), Ok(vec!["r1".into(), "r2".into(), "r3".into()]));
    assert_eq!(reader.read_record(), Ok(None), "The stream should be exhausted.");
    assert_eq!(reader.record_number(), 3);
}

#[test]
fn test_path_stream_closes_on_finish() {
    let mut reader = LineReader::<TrackedHandle>::new("records", &read_mode())
        .expect("opening a tracked handle should succeed");
    assert_eq!(reader.read_line(), Ok(Some("r1".into())));

    assert_eq!(reader.finish(), Ok(()));
    assert!(reader.is_finished());
    assert!(reader.handle().is_none());
    assert_eq!(TrackedHandle::closes(), 1);

    assert_eq!(reader.read_line(), Err(ReadRecordError::Closed(StreamClosedError)));
    assert_eq!(reader.read(None), Err(ReadRecordError::Closed(StreamClosedError)));
    assert_eq!(reader.finish(), Ok(()), "Finishing twice should do nothing.");

    drop(reader);
    assert_eq!(TrackedHandle::closes(), 1, "An owned handle should be closed exactly once.");
}

#[test]
fn test_drop_closes_owned_handle() {
    {
        let _reader = LineReader::<TrackedHandle>::new("records", &read_mode())
            .expect("opening a tracked handle should succeed");
    }
    assert_eq!(TrackedHandle::closes(), 1, "Dropping an unfinished stream should close it.");
}

#[test]
fn test_borrowed_handle_stays_open() {
    let mut handle = MemoryHandle::new();
    let mut writer = LineWriter::from_handle(&mut handle, &record! {})
        .expect("a line writer needs no options");

    assert!(!writer.is_owned());
    assert_eq!(writer.write_line("foo"), Ok(()));
    assert_eq!(writer.finish(), Ok(()));
    assert!(writer.is_finished());
    assert_eq!(writer.write_line("bar"), Err(WriteRecordError::Closed(StreamClosedError)));
    drop(writer);

    assert_eq!(handle.write(b"baz\n"), Ok(4), "The handle should still be usable.");
    assert_eq!(handle.as_str(), Some("foo\nbaz\n"));

    let mut tracked = TrackedHandle::with_records();
    let lines = LineReader::with_handle(&mut tracked, &record! {}, |reader| {
        Ok::<_, StreamError>(reader.read_all_lines()?)
    });
    assert_eq!(lines.map(|l| l.len()), Ok(3));
    assert_eq!(TrackedHandle::closes(), 0, "A borrowed handle should never be closed.");
}

#[test]
fn test_with_finishes_once() {
    let result = LineReader::<TrackedHandle>::with("records", &read_mode(), |reader| {
        Ok::<_, StreamError>(reader.read_all_records()?)
    });
    assert_eq!(result.map(|r| r.len()), Ok(3));
    assert_eq!(TrackedHandle::closes(), 1);

    let result = LineReader::<TrackedHandle>::with("records", &read_mode(), |reader| {
        reader.read_line()?;
        Err::<(), _>(StreamError::from(StreamClosedError))
    });
    assert_eq!(result, Err(StreamError::Closed(StreamClosedError)));
    assert_eq!(TrackedHandle::closes(), 2, "A failing body should still finish the stream.");
}

#[test]
fn test_with_close_failures() {
    let result = LineReader::<TrackedHandle>::with("fail-close", &read_mode(), |reader| {
        Ok::<_, StreamError>(reader.read_line()?)
    });
    assert_eq!(result, Err(StreamError::Close(CloseError::IO(IOError))));

    let result = LineReader::<TrackedHandle>::with("fail-close", &read_mode(), |_| {
        Err::<(), _>(StreamError::from(StreamClosedError))
    });
    assert_eq!(
        result,
        Err(StreamError::Closed(StreamClosedError)),
        "The body's error should take precedence over the close error."
    );
    assert_eq!(TrackedHandle::closes(), 2);
}

#[test]
fn test_with_open_failure() {
    let result = LineReader::<TrackedHandle>::with("missing", &read_mode(), |_| Ok::<_, StreamError>(()));
    assert_eq!(result, Err(StreamError::Open(OpenError::MissingComponent(MissingComponentError))));
    assert_eq!(TrackedHandle::closes(), 0, "Nothing was opened, so nothing should be closed.");
}

#[test]
fn test_with_closes_on_panic() {
    assert_panics!({
        let _ = LineReader::<TrackedHandle>::with("records", &read_mode(), |_| -> Result<(), StreamError> {
            panic!("body failed")
        });
    }, contains "body failed");
    assert_eq!(TrackedHandle::closes(), 1, "Unwinding should close the owned handle.");
}

#[test]
fn test_construct_errors() {
    let mut handle = MemoryHandle::new();

    assert_eq!(
        LineReader::<TrackedHandle>::new("records", &record! {}).err(),
        Some(ConstructError::ModeRequired(ModeRequiredError)),
        "Opening a path should require a mode."
    );
    assert_eq!(
        LineReader::<TrackedHandle>::new("records", &record! { "mode" => "rw" }).err(),
        Some(ConstructError::InvalidMode(InvalidModeError { mode: "rw".into() }))
    );
    assert_eq!(
        LineReader::<TrackedHandle>::new("records", &record! { "mode" => "w" }).err(),
        Some(ConstructError::IncompatibleMode(IncompatibleModeError {
            mode: OpenMode::WRITE,
            access: "reading",
        }))
    );
    assert_eq!(
        LineWriter::from_handle(&mut handle, &record! { "mode" => "r" }).err(),
        Some(ConstructError::IncompatibleMode(IncompatibleModeError {
            mode: OpenMode::READ,
            access: "writing",
        })),
        "A mode given with a handle should still be checked."
    );
    assert_eq!(
        LineReader::from_handle(&mut handle, &record! { "mdoe" => "r" }).err(),
        Some(ConstructError::UnknownField(UnknownFieldError::new("mdoe")))
    );
    assert_eq!(
        LineReader::from_handle(&mut handle, &record! { "mode" => 1 }).err(),
        Some(ConstructError::InvalidOption(InvalidOptionError {
            option: MODE,
            expected: "a mode string",
        }))
    );
    assert_eq!(
        RecordReader::from_handle(&mut handle, &record! {}).err(),
        Some(ConstructError::DelimiterRequired(DelimiterRequiredError))
    );
    assert_eq!(
        RecordReader::from_handle(&mut handle, &record! { "delimiter" => "" }).err(),
        Some(ConstructError::DelimiterRequired(DelimiterRequiredError))
    );
    assert_eq!(
        RecordWriter::from_handle(&mut handle, &record! { "delimiter" => "|", "delimiter_position" => "inside" })
            .err()
            .map(|e| e.is_invalid_option()),
        Some(true)
    );
    assert_eq!(TrackedHandle::closes(), 0);
}

#[test]
fn test_line_round_trip() {
    let mut handle = MemoryHandle::new();
    LineWriter::with_handle(&mut handle, &record! {}, |writer| {
        Ok::<_, StreamError>(writer.write_records(["foo", "bar"])?)
    }).expect("writing to memory should succeed");
    assert_eq!(handle.as_str(), Some("foo\nbar\n"));

    handle.rewind();
    let lines = LineReader::with_handle(&mut handle, &record! {}, |reader| {
        Ok::<_, StreamError>(reader.read_all_records()?)
    });
    assert_eq!(lines, Ok(vec!["foo".to_owned(), "bar".to_owned()]));
}

#[test]
fn test_lines_strip_carriage_returns() {
    let mut handle = MemoryHandle::from("a\r\nb\nc");
    let mut reader = LineReader::from_handle(&mut handle, &record! {})
        .expect("a line reader needs no options");
    assert_eq!(
        reader.read_all_lines(),
        Ok(vec!["a".into(), "b".into(), "c".into()]),
        "A final line without a terminator should still be read."
    );
}

#[test]
fn test_delimited_reader() {
    let mut handle = MemoryHandle::from("foo|bar|baz\n");
    let mut reader = RecordReader::from_handle(&mut handle, &record! { "delimiter" => "|" })
        .expect("a delimiter was provided");

    assert_eq!(reader.read_record(), Ok(Some("foo".into())));
    assert_eq!(reader.read_record(), Ok(Some("bar".into())));
    assert_eq!(reader.read_record(), Ok(Some("baz\n".into())), "Only the delimiter is stripped.");
    assert_eq!(reader.read_record(), Ok(None));
}

#[test]
fn test_delimiter_across_chunks() {
    let first = "a".repeat(READ_CHUNK - 1);
    let mut handle = MemoryHandle::from(format!("{first}||b").into_bytes());
    let mut reader = RecordReader::from_handle(&mut handle, &record! { "delimiter" => "||" })
        .expect("a delimiter was provided");

    assert_eq!(
        reader.read_all_records(),
        Ok(vec![first, "b".into()]),
        "A delimiter split between two reads should still be found."
    );
}

#[test]
fn test_delimiter_positions() {
    for (position, expected) in [
        ("before", "|a|b"),
        ("after", "a|b|"),
        ("between", "a|b"),
        ("around", "|a||b|"),
    ] {
        let mut handle = MemoryHandle::new();
        let options = record! { "delimiter" => "|", "delimiter_position" => position };
        RecordWriter::with_handle(&mut handle, &options, |writer| {
            Ok::<_, StreamError>(writer.write_records(["a", "b"])?)
        }).expect("writing to memory should succeed");

        assert_eq!(handle.as_str(), Some(expected), "Delimiters placed {position}.");
    }
}

#[test]
fn test_paragraphs() {
    let mut handle = MemoryHandle::from("\n\nfirst para\nline two\n\n\n\nsecond\n");
    let mut reader = ParagraphReader::from_handle(&mut handle, &record! {})
        .expect("a paragraph reader needs no options");

    assert_eq!(reader.read_paragraph(), Ok(Some("first para\nline two".into())));
    assert_eq!(
        reader.read_paragraph(),
        Ok(Some("second".into())),
        "Runs of blank lines should count as one separator."
    );
    assert_eq!(reader.read_paragraph(), Ok(None));
    drop(reader);

    let mut handle = MemoryHandle::new();
    let mut writer = ParagraphWriter::from_handle(&mut handle, &record! {})
        .expect("a paragraph writer needs no options");
    assert_eq!(writer.write_paragraphs(["one\ntwo", "three"]), Ok(()));
    assert_eq!(writer.record_number(), 2);
    drop(writer);
    assert_eq!(handle.as_str(), Some("one\ntwo\n\nthree\n\n"));
}

#[test]
fn test_records_iterator() {
    let mut handle = MemoryHandle::from(&b"ok\n\xff\nafter\n"[..]);
    let mut reader = LineReader::from_handle(&mut handle, &record! {})
        .expect("a line reader needs no options");

    let mut records = reader.records();
    assert_eq!(records.next(), Some(Ok("ok".into())));
    assert_eq!(records.next(), Some(Err(ReadRecordError::Decode(DecodeError { valid_up_to: 0 }))));
    assert_eq!(records.next(), None, "The iterator should stop after an error.");

    let mut visited = Vec::new();
    assert_eq!(reader.read_each(|line| visited.push(line)), Ok(()));
    assert_eq!(visited, ["after"], "Reading should resume after the invalid record.");
}

#[test]
fn test_raw_read() {
    let mut handle = MemoryHandle::from("hello world\nrest");
    let mut reader = Reader::from_handle(&mut handle, &record! {})
        .expect("a reader needs no options");

    assert_eq!(reader.read(Some(5)), Ok(b"hello".to_vec()));
    assert_eq!(reader.read(None), Ok(b" world\nrest".to_vec()));
    assert_eq!(reader.read(None), Ok(Vec::new()), "Reading at the end should return nothing.");
    assert_eq!(reader.read_record(), Ok(None));
    drop(reader);

    let mut handle = MemoryHandle::from("first\nrest");
    let mut reader = LineReader::from_handle(&mut handle, &record! {})
        .expect("a line reader needs no options");
    assert_eq!(reader.read_line(), Ok(Some("first".into())));
    assert_eq!(reader.read(None), Ok(b"rest".to_vec()), "Buffered bytes should be returned first.");
}

#[test]
fn test_partial_writes() {
    let mut trickle = TrickleHandle(Vec::new());
    let mut writer = LineWriter::from_handle(&mut trickle, &record! {})
        .expect("a line writer needs no options");
    assert_eq!(writer.write_lines(["foo", "bar"]), Ok(()));
    assert_eq!(writer.write(b"raw"), Ok(()));
    assert_eq!(writer.record_number(), 2, "Raw writes shouldn't count as records.");
    drop(writer);
    assert_eq!(trickle.0, b"foo\nbar\nraw");

    let mut stuck = StuckHandle;
    let mut writer = Writer::from_handle(&mut stuck, &record! {})
        .expect("a writer needs no options");
    assert_eq!(
        writer.write_record("foo"),
        Err(WriteRecordError::Write(WriteError::IO(IOError))),
        "A handle that accepts nothing should fail rather than loop forever."
    );
}

#[test]
fn test_quick_helpers() {
    let data = quick_read::<TrackedHandle, _>("records", &record! {});
    assert_eq!(data, Ok(b"r1\nr2\nr3\n".to_vec()), "The mode should default to reading.");

    let records = quick_read_records::<TrackedHandle, Lines, _>("records", &record! {});
    assert_eq!(records.map(|r| r.len()), Ok(3));
    assert_eq!(TrackedHandle::closes(), 2);

    assert_eq!(
        quick_read::<TrackedHandle, _>("records", &record! { "mode" => "w" }),
        Err(StreamError::IncompatibleMode(IncompatibleModeError {
            mode: OpenMode::WRITE,
            access: "reading",
        }))
    );
    assert_eq!(
        quick_read::<TrackedHandle, _>("records", &record! { "mdoe" => "r" }),
        Err(StreamError::UnknownField(UnknownFieldError::new("mdoe")))
    );

    let mut tracked = TrackedHandle {
        inner: MemoryHandle::new(),
        fail_close: false,
    };
    assert_eq!(quick_write::<TrackedHandle, _, _>("dumped", &mut tracked, &record! {}), Ok(()));
    assert_eq!(tracked.inner.as_str(), Some("dumped"));
    assert_eq!(TrackedHandle::closes(), 2, "A borrowed handle should be left open.");
}

#[cfg(all(feature = "fs", target_os = "linux"))]
#[test]
fn test_file_streams() {
    use tempfile::TempDir;

    use crate::fs::File;

    init_logging();
    let dir = TempDir::new().expect("Failed to create temp directory");
    let path = dir.path().join("records.txt");

    LineWriter::<File>::with(&path, &record! { "mode" => "w" }, |writer| {
        Ok::<_, StreamError>(writer.write_records(["foo", "bar"])?)
    }).expect("writing to a temp file should succeed");

    let lines = quick_read_records::<File, Lines, _>(&path, &record! {});
    assert_eq!(lines, Ok(vec!["foo".to_owned(), "bar".to_owned()]));

    assert_eq!(quick_write::<File, _, _>("a|b", &path, &record! {}), Ok(()));
    let records = quick_read_records::<File, Delimited, _>(&path, &record! { "delimiter" => "|" });
    assert_eq!(records, Ok(vec!["a".to_owned(), "b".to_owned()]), "Writing should truncate.");

    let missing = dir.path().join("missing").join("file.txt");
    assert_eq!(
        quick_read::<File, _>(&missing, &record! {}),
        Err(StreamError::Open(OpenError::MissingComponent(MissingComponentError)))
    );
}

/// Reports an empty delimiter, which should read the same as having none.
#[derive(Debug)]
struct EmptyDelimiter;

impl Codec for EmptyDelimiter {
    type Record = Vec<u8>;

    fn from_config(_: &StreamConfig) -> Result<Self, ConstructError> {
        Ok(EmptyDelimiter)
    }

    fn delimiter(&self) -> Option<&[u8]> {
        Some(b"".as_slice())
    }

    fn decode(&mut self, raw: Vec<u8>) -> Result<Option<Vec<u8>>, DecodeError> {
        Ok(Some(raw))
    }

    fn encode(&self, record: &[u8], _: bool, out: &mut Vec<u8>) {
        out.extend_from_slice(record);
    }
}

#[test]
fn test_empty_codec_delimiter() {
    let contents = "a".repeat(READ_CHUNK + 3);
    let mut handle = MemoryHandle::from(contents.as_str());
    let mut reader = RecordStream::<_, EmptyDelimiter, Reading>::from_handle(&mut handle, &record! {})
        .expect("the codec needs no options");

    assert_eq!(
        reader.read_all_records(),
        Ok(vec![contents.into_bytes()]),
        "An empty delimiter should never match, leaving the whole stream as one record."
    );
    assert_eq!(reader.read_record(), Ok(None));
}

#[test]
fn test_csv_reader() {
    let mut handle = MemoryHandle::from(
        "name,notes\r\nalice,\"likes, commas\"\n\nbob,\"two\nlines\"\ncarol,\"say \"\"hi\"\"\"\n",
    );
    let mut reader = CsvReader::from_handle(&mut handle, &record! { "header" => true })
        .expect("a header flag is a valid option");

    assert_eq!(reader.read_header(), Ok(Some(&["name".to_owned(), "notes".to_owned()][..])));
    assert_eq!(
        reader.read_header().map(|header| header.map(<[String]>::len)),
        Ok(Some(2)),
        "The header should only be read once."
    );
    assert_eq!(
        reader.read_all_rows(),
        Ok(vec![
            vec!["alice".to_owned(), "likes, commas".to_owned()],
            vec!["bob".to_owned(), "two\nlines".to_owned()],
            vec!["carol".to_owned(), "say \"hi\"".to_owned()],
        ]),
        "Quoted fields may hold separators, line breaks and quotes, and blank lines are skipped."
    );
    assert_eq!(reader.record_number(), 3, "The header shouldn't count as a record.");
    drop(reader);

    let mut handle = MemoryHandle::from("id;score\n1;2.5\n");
    let mut reader = CsvReader::from_handle(&mut handle, &record! { "delimiter" => ";", "header" => true })
        .expect("a single byte separator is a valid option");
    assert_eq!(
        reader.read_row(),
        Ok(Some(vec!["1".to_owned(), "2.5".to_owned()])),
        "The header should be consumed without asking for it."
    );
    assert_eq!(reader.codec().header(), Some(&["id".to_owned(), "score".to_owned()][..]));
    assert_eq!(reader.read_row(), Ok(None));
}

#[test]
fn test_csv_writer() {
    let mut handle = MemoryHandle::new();
    let options = record! { "header" => ["name", "age"] };
    CsvWriter::with_handle(&mut handle, &options, |writer| {
        Ok::<_, StreamError>(writer.write_rows([["alice", "30"], ["bob, jr", "4"]])?)
    }).expect("writing to memory should succeed");
    assert_eq!(handle.as_str(), Some("name,age\nalice,30\n\"bob, jr\",4\n"));

    let mut handle = MemoryHandle::new();
    let mut writer = CsvWriter::from_handle(&mut handle, &record! { "header" => true })
        .expect("a header flag is a valid option");
    assert_eq!(writer.write_row(["say \"hi\"", "x"]), Ok(()));
    drop(writer);
    assert_eq!(
        handle.as_str(),
        Some("\"say \"\"hi\"\"\",x\n"),
        "A header without column names has nothing to write."
    );

    let mut handle = MemoryHandle::new();
    assert_eq!(
        CsvWriter::from_handle(&mut handle, &record! { "delimiter" => "||" }).err(),
        Some(ConstructError::InvalidOption(InvalidOptionError {
            option: DELIMITER,
            expected: "a single byte separator",
        }))
    );
    assert_eq!(
        CsvReader::from_handle(&mut handle, &record! { "header" => 1 }).err(),
        Some(ConstructError::InvalidOption(InvalidOptionError {
            option: HEADER,
            expected: "true, false or a list of column names",
        }))
    );
}
