use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use derive_more::{Display, Error};

/// The mode string provided wasn't one of the recognised open modes.
#[derive(Debug, Display, Clone, PartialEq, Eq, Error)]
#[display("invalid open mode: {mode:?}")]
pub struct InvalidModeError {
    pub mode: String,
}

/// How a handle should be opened from a path, parsed from the familiar `fopen`-style mode strings.
///
/// | Mode | Read | Write | Create | Truncate | Append |
/// |-|-|-|-|-|-|
/// | `r` | yes | | | | |
/// | `r+` | yes | yes | | | |
/// | `w` | | yes | yes | yes | |
/// | `w+` | yes | yes | yes | yes | |
/// | `a` | | yes | yes | | yes |
/// | `a+` | yes | yes | yes | | yes |
///
/// A `b` or `t` may appear after the first character and is ignored, there is no distinction
/// between binary and text handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMode {
    pub(crate) read: bool,
    pub(crate) write: bool,
    pub(crate) create: bool,
    pub(crate) truncate: bool,
    pub(crate) append: bool,
}

impl OpenMode {
    pub const READ: OpenMode = OpenMode {
        read: true,
        write: false,
        create: false,
        truncate: false,
        append: false,
    };

    pub const WRITE: OpenMode = OpenMode {
        read: false,
        write: true,
        create: true,
        truncate: true,
        append: false,
    };

    pub const APPEND: OpenMode = OpenMode {
        read: false,
        write: true,
        create: true,
        truncate: false,
        append: true,
    };

    /// Returns the same mode, with reading and writing both allowed (the `+` suffix).
    pub const fn updating(self) -> OpenMode {
        OpenMode {
            read: true,
            write: true,
            ..self
        }
    }

    pub const fn readable(&self) -> bool {
        self.read
    }

    pub const fn writable(&self) -> bool {
        self.write
    }

    pub const fn creates(&self) -> bool {
        self.create
    }

    pub const fn truncates(&self) -> bool {
        self.truncate
    }

    pub const fn appends(&self) -> bool {
        self.append
    }
}

impl FromStr for OpenMode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidModeError { mode: s.to_owned() };

        let mut chars = s.chars();
        let base = match chars.next() {
            Some('r') => OpenMode::READ,
            Some('w') => OpenMode::WRITE,
            Some('a') => OpenMode::APPEND,
            _ => Err(invalid())?,
        };

        let mut plus = false;
        let mut kind = false;
        for c in chars {
            match c {
                '+' if !plus => plus = true,
                'b' | 't' if !kind => kind = true,
                _ => Err(invalid())?,
            }
        }

        Ok(if plus { base.updating() } else { base })
    }
}

impl Display for OpenMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let base = if self.append {
            "a"
        } else if self.create {
            "w"
        } else {
            "r"
        };
        let plus = if self.read && self.write { "+" } else { "" };
        write!(f, "{base}{plus}")
    }
}
