//! One-call helpers for slurping data out of, or dumping data into, a path or handle.

use super::{Codec, MODE, Reader, Reading, RecordStream, StreamError, Target, Writer, stream_options};
use crate::handle::Open;
use crate::record::{Options, UnknownFieldError};

/// Reads everything from `target`, opening and closing it if it is a path. The `mode` defaults to
/// `"r"` if the options leave it unset.
///
/// ```no_run
/// use record_kit::fs::File;
/// use record_kit::record;
/// use record_kit::stream::{StreamError, quick_read};
///
/// let data = quick_read::<File, _>("notes.txt", &record! {})?;
/// # Ok::<(), StreamError>(())
/// ```
pub fn quick_read<'h, H, T>(target: T, options: &Options) -> Result<Vec<u8>, StreamError>
where
    H: Open + 'h,
    T: Into<Target<'h, H>>,
{
    let options = with_default_mode(options, "r")?;
    Reader::<H>::with(target, &options, |reader| Ok(reader.read(None)?))
}

/// Writes `data` to `target`, opening and closing it if it is a path. The `mode` defaults to
/// `"w"` if the options leave it unset.
pub fn quick_write<'h, H, D, T>(data: D, target: T, options: &Options) -> Result<(), StreamError>
where
    H: Open + 'h,
    D: AsRef<[u8]>,
    T: Into<Target<'h, H>>,
{
    let options = with_default_mode(options, "w")?;
    Writer::<H>::with(target, &options, |writer| Ok(writer.write(data)?))
}

/// Reads every record from `target` with the codec `C`, opening and closing it if it is a path.
/// The `mode` defaults to `"r"` if the options leave it unset.
pub fn quick_read_records<'h, H, C, T>(target: T, options: &Options) -> Result<Vec<C::Record>, StreamError>
where
    H: Open + 'h,
    C: Codec,
    T: Into<Target<'h, H>>,
{
    let options = with_default_mode(options, "r")?;
    RecordStream::<H, C, Reading>::with(target, &options, |reader| Ok(reader.read_all_records()?))
}

fn with_default_mode(options: &Options, mode: &str) -> Result<Options, UnknownFieldError> {
    let mut merged = stream_options().updated(options.iter().map(|(field, value)| (field, value.clone())))?;
    if merged.get(MODE)?.is_unset() {
        merged.set(MODE, mode)?;
    }
    Ok(merged)
}
