#![cfg(test)]

use tempfile::TempDir;

use super::*;
use crate::handle::{Handle, OpenError, OpenMode, READ_CHUNK, ReadError, WriteError};

fn scratch() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

#[test]
fn test_create_write_read() {
    let dir = scratch();
    let path = dir.path().join("out.txt");

    let file = File::create(&path).expect("creating in a temp dir should succeed");
    assert_eq!(file.write(b"line 1\n"), Ok(7));
    file.close().expect("closing a fresh file should succeed");

    let file = File::open_read(&path).expect("the file was just created");
    assert_eq!(file.read_to_end().as_deref(), Ok(&b"line 1\n"[..]));
}

#[test]
fn test_read_to_end_across_chunks() {
    let dir = scratch();
    let path = dir.path().join("large.bin");
    let contents: Vec<u8> = (0..READ_CHUNK * 2 + 17).map(|i| (i % 251) as u8).collect();

    let file = File::create(&path).expect("creating in a temp dir should succeed");
    let mut written = 0;
    while written < contents.len() {
        written += file.write(&contents[written..]).expect("writing to a temp file should succeed");
    }
    file.close().expect("closing a fresh file should succeed");

    let file = File::open_read(&path).expect("the file was just created");
    assert_eq!(
        file.read_to_end(),
        Ok(contents),
        "Reading should continue past the first chunk until the end of the file."
    );
}

#[test]
fn test_append_mode() {
    let dir = scratch();
    let path = dir.path().join("log.txt");

    for line in ["a\n", "b\n"] {
        let mut file = File::open(&path, &OpenMode::APPEND).expect("append creates the file");
        assert_eq!(Handle::write(&mut file, line.as_bytes()), Ok(2));
    }

    let contents = File::open_read(&path).map(|f| f.read_to_end());
    assert_eq!(contents, Ok(Ok(b"a\nb\n".to_vec())), "Appends should not truncate the file.");
}

#[test]
fn test_access_checked_against_mode() {
    let dir = scratch();
    let path = dir.path().join("file.txt");

    let file = File::create(&path).expect("creating in a temp dir should succeed");
    let mut buf = [0_u8; 4];
    assert!(
        matches!(file.read(&mut buf), Err(ReadError::NotReadable(_))),
        "A write-only file shouldn't be readable."
    );

    let file = File::open_read(&path).expect("the file was just created");
    assert!(matches!(file.write(b"x"), Err(WriteError::NotWritable(_))));
}

#[test]
fn test_open_errors() {
    let dir = scratch();

    assert!(
        matches!(
            File::open_read(dir.path().join("missing.txt")),
            Err(OpenError::MissingComponent(_))
        ),
        "Opening a missing file for reading should report the missing component."
    );
    assert!(matches!(
        File::create(dir.path()),
        Err(OpenError::IsDirectory(_))
    ));
    assert!(matches!(
        File::open_read("bad\0path"),
        Err(OpenError::InvalidPath(_))
    ));
}
