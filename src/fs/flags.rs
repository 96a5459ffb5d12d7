use libc::{O_APPEND, O_CLOEXEC, O_CREAT, O_RDONLY, O_RDWR, O_TRUNC, O_WRONLY, c_int};

use crate::handle::OpenMode;

/// Permissions applied to files created by [`File`](super::File), before the umask.
pub(crate) const DEFAULT_PERMISSIONS: c_int = 0o644;

macro_rules! set_flag {
    ($flags:ident, $value:expr, $flag:expr) => {
        if $value {
            $flags |= $flag;
        }
    };
}

impl OpenMode {
    /// Converts the mode into the flags expected by `open(2)`.
    pub(crate) const fn flags(&self) -> c_int {
        let mut flags = match (self.read, self.write) {
            (true, true) => O_RDWR,
            (false, true) => O_WRONLY,
            _ => O_RDONLY,
        } | O_CLOEXEC;

        set_flag!(flags, self.create, O_CREAT);
        set_flag!(flags, self.truncate, O_TRUNC);
        set_flag!(flags, self.append, O_APPEND);
        flags
    }
}
