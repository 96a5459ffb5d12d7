use std::path::Path;

use super::flags::DEFAULT_PERMISSIONS;
use super::Fd;
use crate::handle::{
    CloseError, Handle, NotReadableError, NotWritableError, Open, OpenError, OpenMode, READ_CHUNK,
    ReadError, WriteError,
};

/// An open file, which is closed when dropped or explicitly through [`File::close`].
///
/// Files remember the [`OpenMode`] they were opened with: reading a file that wasn't opened for
/// reading returns a [`NotReadableError`] (and writing likewise), rather than passing the call to
/// the OS.
#[derive(Debug)]
pub struct File {
    pub(crate) fd: Fd,
    pub(crate) mode: OpenMode,
}

impl File {
    /// Opens the file at `file_path` with the provided `mode`. Files created as a result are given
    /// `rw-r--r--` permissions, subject to the process' umask.
    pub fn open<P: AsRef<Path>>(file_path: P, mode: &OpenMode) -> Result<File, OpenError> {
        let fd = Fd::open(file_path.as_ref(), mode.flags(), DEFAULT_PERMISSIONS)?;
        log::trace!("opened {:?} as {fd:?} with mode {mode}", file_path.as_ref());
        Ok(File {
            fd,
            mode: *mode,
        })
    }

    /// Opens the file at `file_path` for reading only.
    pub fn open_read<P: AsRef<Path>>(file_path: P) -> Result<File, OpenError> {
        File::open(file_path, &OpenMode::READ)
    }

    /// Creates the file at `file_path` for writing, emptying it if it already exists.
    pub fn create<P: AsRef<Path>>(file_path: P) -> Result<File, OpenError> {
        File::open(file_path, &OpenMode::WRITE)
    }

    /// Returns the mode that this file was opened with.
    pub const fn mode(&self) -> OpenMode {
        self.mode
    }

    pub fn read(&self, buf: &mut [u8]) -> Result<usize, ReadError> {
        if !self.mode.readable() {
            Err(NotReadableError)?
        }
        self.fd.read(buf)
    }

    /// Reads from the current position until the end of the file.
    pub fn read_to_end(&self) -> Result<Vec<u8>, ReadError> {
        let mut bytes = Vec::new();
        let mut chunk = [0_u8; READ_CHUNK];
        loop {
            match self.read(&mut chunk)? {
                0 => break Ok(bytes),
                count => bytes.extend_from_slice(&chunk[..count]),
            }
        }
    }

    pub fn write(&self, buf: &[u8]) -> Result<usize, WriteError> {
        if !self.mode.writable() {
            Err(NotWritableError)?
        }
        self.fd.write(buf)
    }

    pub fn close(self) -> Result<(), CloseError> {
        self.fd.close()
    }
}

impl Handle for File {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, ReadError> {
        File::read(self, buf)
    }

    fn write(&mut self, buf: &[u8]) -> Result<usize, WriteError> {
        File::write(self, buf)
    }

    fn close(self) -> Result<(), CloseError> {
        File::close(self)
    }
}

impl Open for File {
    fn open(path: &Path, mode: &OpenMode) -> Result<Self, OpenError> {
        File::open(path, mode)
    }
}
