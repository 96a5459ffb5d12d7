//! A thin libc-backed file handle.
//!
//! [`File`] wraps a raw file descriptor, translating the `errno` of each failed syscall into the
//! strongly typed errors of the [`handle`](crate::handle) module. It implements both
//! [`Handle`](crate::handle::Handle) and [`Open`](crate::handle::Open), so streams can open files
//! from paths themselves.
#![cfg(target_os = "linux")]

mod error;
mod fd;
mod file;
mod flags;
mod panic;
mod syscall;
mod tests;

pub use file::*;

pub(crate) use fd::*;
pub(crate) use syscall::*;
