use std::ffi::CString;
use std::fmt::{self, Debug, Formatter};
use std::mem::ManuallyDrop;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::thread;

use libc::{EBADF, c_int};

use super::err_no;
use super::panic::{BadFdPanic, Panic};
use crate::handle::{CloseError, InvalidPathError, OpenError, ReadError, WriteError};

/// An owned file descriptor. The descriptor is closed exactly once: either explicitly through
/// [`Fd::close`], or when the Fd is dropped.
pub(crate) struct Fd(pub c_int);

impl Fd {
    pub fn open(path: &Path, flags: c_int, permissions: c_int) -> Result<Fd, OpenError> {
        let pathname = CString::new(path.as_os_str().as_bytes()).map_err(|_| InvalidPathError)?;

        // SAFETY: pathname is a valid nul-terminated string which outlives the call.
        match unsafe { libc::open(pathname.as_ptr(), flags, permissions) } {
            -1 => Err(OpenError::interpret_raw_error(err_no())),
            fd => Ok(Fd(fd)),
        }
    }

    pub fn read(&self, buf: &mut [u8]) -> Result<usize, ReadError> {
        // SAFETY: buf is valid for writes of buf.len() bytes.
        match unsafe { libc::read(self.0, buf.as_mut_ptr().cast(), buf.len()) } {
            -1 => match err_no() {
                EBADF => BadFdPanic.panic(),
                e => Err(ReadError::interpret_raw_error(e)),
            },
            count => Ok(count as usize),
        }
    }

    pub fn write(&self, buf: &[u8]) -> Result<usize, WriteError> {
        // SAFETY: buf is valid for reads of buf.len() bytes.
        match unsafe { libc::write(self.0, buf.as_ptr().cast(), buf.len()) } {
            -1 => match err_no() {
                EBADF => BadFdPanic.panic(),
                e => Err(WriteError::interpret_raw_error(e)),
            },
            count => Ok(count as usize),
        }
    }

    pub fn close(self) -> Result<(), CloseError> {
        // close invalidates the descriptor regardless of the outcome, so drop must not see it.
        let fd = ManuallyDrop::new(self);

        // SAFETY: fd is owned and, because drop is suppressed, closed only here.
        if unsafe { libc::close(fd.0) } == -1 {
            match err_no() {
                EBADF => BadFdPanic.panic(),
                e => Err(CloseError::interpret_raw_error(e))?,
            }
        }
        Ok(())
    }
}

impl Drop for Fd {
    fn drop(&mut self) {
        // SAFETY: After this, the file descriptor is invalidated but we are dropping self so it
        // doesn't matter.
        if unsafe { libc::close(self.0) } == -1 {
            match err_no() {
                // Panic only if we aren't already, to prevent aborting an existing unwind.
                EBADF if !thread::panicking() => BadFdPanic.panic(),
                EBADF => (),
                e => log::warn!(
                    "error while dropping file descriptor {}: {}",
                    self.0,
                    CloseError::interpret_raw_error(e)
                ),
            }
        }
    }
}

impl Debug for Fd {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Fd({})", self.0)
    }
}
