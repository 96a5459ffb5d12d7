use libc::{
    EACCES, EAGAIN, EDQUOT, EEXIST, EFAULT, EFBIG, EINTR, EIO, EISDIR, ELOOP, EMFILE, ENAMETOOLONG,
    ENFILE, ENOENT, ENOSPC, ENOTDIR, EPERM, EROFS,
};

use super::panic::{BadAddrPanic, Panic};
use crate::handle::*;

// EBADF is handled by each caller, because its meaning depends on how the descriptor was used.

impl OpenError {
    pub(crate) fn interpret_raw_error(error: RawOsError) -> OpenError {
        match error {
            EACCES | EPERM =>  AccessError.into(),
            EEXIST =>          AlreadyExistsError.into(),
            ELOOP =>           ExcessiveLinksError.into(),
            EMFILE | ENFILE => FileCountError.into(),
            EINTR =>           InterruptError.into(),
            EISDIR =>          IsDirectoryError.into(),
            ENOENT =>          MissingComponentError.into(),
            ENOTDIR =>         NonDirComponentError.into(),
            ENAMETOOLONG =>    PathLengthError.into(),
            EROFS =>           ReadOnlyFSError.into(),
            ENOSPC | EDQUOT => StorageExhaustedError.into(),
            EFAULT =>          BadAddrPanic.panic(),
            e =>               UnexpectedError(e).into(),
        }
    }
}

impl ReadError {
    pub(crate) fn interpret_raw_error(error: RawOsError) -> ReadError {
        match error {
            EINTR =>  InterruptError.into(),
            EIO =>    IOError.into(),
            EISDIR => IsDirectoryError.into(),
            EAGAIN => WouldBlockError.into(),
            EFAULT => BadAddrPanic.panic(),
            e =>      UnexpectedError(e).into(),
        }
    }
}

impl WriteError {
    pub(crate) fn interpret_raw_error(error: RawOsError) -> WriteError {
        match error {
            EINTR =>                  InterruptError.into(),
            EIO =>                    IOError.into(),
            ENOSPC | EDQUOT | EFBIG => StorageExhaustedError.into(),
            EAGAIN =>                 WouldBlockError.into(),
            EFAULT =>                 BadAddrPanic.panic(),
            e =>                      UnexpectedError(e).into(),
        }
    }
}

impl CloseError {
    pub(crate) fn interpret_raw_error(error: RawOsError) -> CloseError {
        match error {
            EINTR =>           InterruptError.into(),
            EIO =>             IOError.into(),
            ENOSPC | EDQUOT => StorageExhaustedError.into(),
            e =>               UnexpectedError(e).into(),
        }
    }
}
