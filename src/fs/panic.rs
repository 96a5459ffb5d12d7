use std::error::Error;

use derive_more::{Display, Error};

/// An error that indicates corruption rather than a recoverable failure, which panics instead of
/// being returned.
pub trait Panic: Error {
    fn panic(&self) -> ! {
        panic!("{}", self)
    }
}

#[derive(Debug, Display, Error)]
#[display("file descriptor corruption")]
pub struct BadFdPanic;
impl Panic for BadFdPanic {}

#[derive(Debug, Display, Error)]
#[display("pointer exceeded accessible address space")]
pub struct BadAddrPanic;
impl Panic for BadAddrPanic {}
