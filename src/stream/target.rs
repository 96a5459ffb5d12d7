use std::path::{Path, PathBuf};

/// What a stream is constructed from: either a path, which the stream opens and closes itself, or
/// a handle which the caller has already opened and remains responsible for.
#[derive(Debug)]
pub enum Target<'h, H> {
    Path(PathBuf),
    Handle(&'h mut H),
}

impl<H> From<&str> for Target<'_, H> {
    fn from(path: &str) -> Self {
        Target::Path(path.into())
    }
}

impl<H> From<String> for Target<'_, H> {
    fn from(path: String) -> Self {
        Target::Path(path.into())
    }
}

impl<H> From<&Path> for Target<'_, H> {
    fn from(path: &Path) -> Self {
        Target::Path(path.to_owned())
    }
}

impl<H> From<PathBuf> for Target<'_, H> {
    fn from(path: PathBuf) -> Self {
        Target::Path(path)
    }
}

impl<H> From<&PathBuf> for Target<'_, H> {
    fn from(path: &PathBuf) -> Self {
        Target::Path(path.clone())
    }
}

impl<'h, H> From<&'h mut H> for Target<'h, H> {
    fn from(handle: &'h mut H) -> Self {
        Target::Handle(handle)
    }
}

/// The handle held by a stream, and whether the stream is responsible for closing it.
#[derive(Debug)]
pub(crate) enum Slot<'h, H> {
    /// Opened by the stream, which closes it when finished.
    Owned(H),
    /// Provided by the caller, who keeps ownership. Never closed by the stream.
    Borrowed(&'h mut H),
    /// The stream has been finished and holds nothing.
    Released,
}

impl<H> Slot<'_, H> {
    pub fn handle(&self) -> Option<&H> {
        match self {
            Slot::Owned(handle) => Some(handle),
            Slot::Borrowed(handle) => Some(&**handle),
            Slot::Released => None,
        }
    }

    pub fn handle_mut(&mut self) -> Option<&mut H> {
        match self {
            Slot::Owned(handle) => Some(handle),
            Slot::Borrowed(handle) => Some(&mut **handle),
            Slot::Released => None,
        }
    }
}
