use std::fmt::Debug;

use crate::handle::OpenMode;
use crate::util::sealed::Sealed;

/// The direction of a [`RecordStream`](super::RecordStream), fixed by its type.
pub trait Access: Sealed + Debug {
    /// The name used for this kind of access in errors and logs.
    const NAME: &'static str;

    /// Returns true if a handle opened with `mode` can be used for this kind of access.
    fn permits(mode: &OpenMode) -> bool;
}

pub trait Readable: Access {}

pub trait Writable: Access {}

#[derive(Debug)]
pub enum Reading {}

impl Sealed for Reading {}

impl Access for Reading {
    const NAME: &'static str = "reading";

    fn permits(mode: &OpenMode) -> bool {
        mode.readable()
    }
}

impl Readable for Reading {}

#[derive(Debug)]
pub enum Writing {}

impl Sealed for Writing {}

impl Access for Writing {
    const NAME: &'static str = "writing";

    fn permits(mode: &OpenMode) -> bool {
        mode.writable()
    }
}

impl Writable for Writing {}
