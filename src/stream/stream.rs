use std::fmt::{self, Debug, Formatter};
use std::marker::PhantomData;
use std::mem;

use super::buffer::ReadBuffer;
use super::target::Slot;
use super::{
    Access, Codec, ConstructError, IncompatibleModeError, ModeRequiredError, StreamClosedError,
    StreamConfig, Target,
};
use crate::handle::{CloseError, Handle, Open, OpenMode};
use crate::record::Options;
use crate::util::fmt::DebugRaw;

/// A sequential reader or writer of records, over a handle that it either owns or borrows.
///
/// The record format is decided by the [`Codec`] `C`, and the direction by the [`Access`] `A`. The
/// type aliases in this module ([`LineReader`](super::LineReader),
/// [`RecordWriter`](super::RecordWriter), etc.) cover the common combinations.
///
/// # Ownership
/// A stream constructed from a path opens the handle itself and closes it when
/// [`finish`](RecordStream::finish) is called (or when the stream is dropped). A stream
/// constructed from a `&mut` handle only borrows it: finishing releases the borrow but never
/// closes the handle, which the caller can keep using.
///
/// # Lifecycle
/// A stream is open from construction until it is finished. Once finished, every read or write
/// returns a [`StreamClosedError`]. [`with`](RecordStream::with) scopes a stream to a closure,
/// finishing it regardless of how the closure returns.
pub struct RecordStream<'h, H: Handle, C: Codec, A: Access> {
    pub(crate) slot: Slot<'h, H>,
    pub(crate) codec: C,
    pub(crate) buffer: ReadBuffer,
    pub(crate) count: usize,
    pub(crate) _access: PhantomData<fn() -> A>,
}

impl<'h, H: Handle, C: Codec, A: Access> RecordStream<'h, H, C, A> {
    /// Creates a stream over a handle that the caller has already opened. The handle is borrowed
    /// for the lifetime of the stream and is left open when the stream is finished.
    ///
    /// A `mode` may be provided in the `options`, in which case it is checked against the stream's
    /// direction, but it has no other effect.
    pub fn from_handle(handle: &'h mut H, options: &Options) -> Result<Self, ConstructError> {
        let config = StreamConfig::from_options(options)?;
        if let Some(mode) = config.mode() {
            check_access::<A>(mode)?;
        }
        let codec = C::from_config(&config)?;

        log::debug!("borrowed handle for {} with {codec:?}", A::NAME);
        Ok(RecordStream::from_parts(Slot::Borrowed(handle), codec))
    }

    /// Creates a stream over a borrowed handle, passes it to `body` and then finishes it. See
    /// [`with`](RecordStream::with) for how errors are combined.
    pub fn with_handle<R, E, F>(handle: &'h mut H, options: &Options, body: F) -> Result<R, E>
    where
        F: FnOnce(&mut Self) -> Result<R, E>,
        E: From<ConstructError> + From<CloseError>,
    {
        let stream = RecordStream::from_handle(handle, options)?;
        stream.run_scoped(body)
    }

    pub(crate) fn from_parts(slot: Slot<'h, H>, codec: C) -> Self {
        RecordStream {
            slot,
            codec,
            buffer: ReadBuffer {
                bytes: Vec::new(),
                eof: false,
            },
            count: 0,
            _access: PhantomData,
        }
    }

    /// Returns the number of records read or written so far.
    pub const fn record_number(&self) -> usize {
        self.count
    }

    /// Returns true if the stream has been finished and can no longer be used.
    pub const fn is_finished(&self) -> bool {
        matches!(self.slot, Slot::Released)
    }

    /// Returns true if the stream opened its handle itself, and will therefore close it.
    pub const fn is_owned(&self) -> bool {
        matches!(self.slot, Slot::Owned(_))
    }

    /// Returns the underlying handle, or None if the stream has been finished.
    pub fn handle(&self) -> Option<&H> {
        self.slot.handle()
    }

    pub const fn codec(&self) -> &C {
        &self.codec
    }

    /// Finishes the stream, closing the handle if the stream opened it. A borrowed handle is
    /// released without being closed.
    ///
    /// After this, all reads and writes fail. Finishing an already finished stream does nothing,
    /// an owned handle is never closed twice.
    pub fn finish(&mut self) -> Result<(), CloseError> {
        self.buffer = ReadBuffer::default();

        match mem::replace(&mut self.slot, Slot::Released) {
            Slot::Owned(handle) => {
                log::debug!("closing owned handle after {} records", self.count);
                handle.close()
            },
            Slot::Borrowed(_) => {
                log::debug!("releasing borrowed handle after {} records", self.count);
                Ok(())
            },
            Slot::Released => Ok(()),
        }
    }

    pub(crate) fn handle_or_closed(&mut self) -> Result<&mut H, StreamClosedError> {
        self.slot.handle_mut().ok_or(StreamClosedError)
    }

    fn run_scoped<R, E, F>(mut self, body: F) -> Result<R, E>
    where
        F: FnOnce(&mut Self) -> Result<R, E>,
        E: From<CloseError>,
    {
        let result = body(&mut self);
        let finished = self.finish();

        match (result, finished) {
            (Ok(value), Ok(())) => Ok(value),
            (Ok(_), Err(close)) => Err(close.into()),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(close)) => {
                log::warn!("failed to close handle after an error in the stream body: {close}");
                Err(e)
            },
        }
    }
}

impl<'h, H: Open, C: Codec, A: Access> RecordStream<'h, H, C, A> {
    /// Creates a stream from either a path or an already open handle.
    ///
    /// When provided a path, the stream opens it with the `mode` from the `options`, which is
    /// required: there is no default, because guessing between reading and writing is how files
    /// get truncated by accident. The handle is owned by the stream and closed when it finishes.
    ///
    /// When provided a handle, this is equivalent to [`from_handle`](RecordStream::from_handle).
    pub fn new<T: Into<Target<'h, H>>>(target: T, options: &Options) -> Result<Self, ConstructError> {
        let path = match target.into() {
            Target::Handle(handle) => return RecordStream::from_handle(handle, options),
            Target::Path(path) => path,
        };

        let config = StreamConfig::from_options(options)?;
        let mode = config.mode().ok_or(ModeRequiredError)?;
        check_access::<A>(mode)?;
        let codec = C::from_config(&config)?;
        let handle = H::open(&path, mode)?;

        log::debug!("opened {} with mode {mode} for {} with {codec:?}", path.display(), A::NAME);
        Ok(RecordStream::from_parts(Slot::Owned(handle), codec))
    }

    /// Creates a stream, passes it to `body` and then finishes it, so that a handle opened from a
    /// path is always closed.
    ///
    /// `finish` is called exactly once, whether `body` succeeds or fails. If `body` fails, its
    /// error is returned, even if closing also fails (in which case the close error is logged).
    /// If `body` panics, the stream is dropped during unwinding, which closes an owned handle.
    ///
    /// ```no_run
    /// use record_kit::fs::File;
    /// use record_kit::record;
    /// use record_kit::stream::{LineWriter, StreamError};
    ///
    /// LineWriter::<File>::with("out.txt", &record! { "mode" => "w" }, |writer| {
    ///     Ok::<_, StreamError>(writer.write_records(["foo", "bar"])?)
    /// })?;
    /// # Ok::<(), StreamError>(())
    /// ```
    pub fn with<T, R, E, F>(target: T, options: &Options, body: F) -> Result<R, E>
    where
        T: Into<Target<'h, H>>,
        F: FnOnce(&mut Self) -> Result<R, E>,
        E: From<ConstructError> + From<CloseError>,
    {
        let stream = RecordStream::new(target, options)?;
        stream.run_scoped(body)
    }
}

fn check_access<A: Access>(mode: &OpenMode) -> Result<(), IncompatibleModeError> {
    if A::permits(mode) {
        Ok(())
    } else {
        Err(IncompatibleModeError {
            mode: *mode,
            access: A::NAME,
        })
    }
}

impl<H: Handle, C: Codec, A: Access> Drop for RecordStream<'_, H, C, A> {
    fn drop(&mut self) {
        if self.is_owned() {
            if let Err(e) = self.finish() {
                log::warn!("error while closing handle of dropped stream: {e}");
            }
        }
    }
}

impl<H: Handle, C: Codec, A: Access> Debug for RecordStream<'_, H, C, A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStream")
            .field("<access>", &DebugRaw(A::NAME.into()))
            .field("handle", &DebugRaw(match self.slot {
                Slot::Owned(_) => "owned".into(),
                Slot::Borrowed(_) => "borrowed".into(),
                Slot::Released => "released".into(),
            }))
            .field("codec", &self.codec)
            .field("buffered", &self.buffer.bytes.len())
            .field("records", &self.count)
            .finish()
    }
}
