use derive_more::{Display, Error, From, IsVariant};

/// The raw error number reported by the OS.
pub type RawOsError = i32;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("interrupted by signal")]
pub struct InterruptError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("error during I/O")]
pub struct IOError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("available storage space exhausted")]
pub struct StorageExhaustedError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("operation would block but handle is non-blocking")]
pub struct WouldBlockError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("handle was not opened for reading")]
pub struct NotReadableError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("handle was not opened for writing")]
pub struct NotWritableError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("handle refers to a directory")]
pub struct IsDirectoryError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("permission denied")]
pub struct AccessError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("file already exists")]
pub struct AlreadyExistsError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("exceeded open file limit")]
pub struct FileCountError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("path contains too many symlinks")]
pub struct ExcessiveLinksError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("path is too long")]
pub struct PathLengthError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("path contains an interior nul byte")]
pub struct InvalidPathError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("a component of the provided path does not exist")]
pub struct MissingComponentError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("a component of the provided path is not a directory")]
pub struct NonDirComponentError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("file system is read-only")]
pub struct ReadOnlyFSError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Error)]
#[display("unexpected OS error with code: {_0}")]
pub struct UnexpectedError(#[error(not(source))] pub RawOsError);

#[derive(Debug, Display, Clone, PartialEq, Eq, From, Error, IsVariant)]
pub enum OpenError {
    Access(AccessError),
    AlreadyExists(AlreadyExistsError),
    ExcessiveLinks(ExcessiveLinksError),
    FileCount(FileCountError),
    Interrupt(InterruptError),
    InvalidPath(InvalidPathError),
    IsDirectory(IsDirectoryError),
    MissingComponent(MissingComponentError),
    NonDirComponent(NonDirComponentError),
    PathLength(PathLengthError),
    ReadOnlyFS(ReadOnlyFSError),
    StorageExhausted(StorageExhaustedError),
    Unexpected(UnexpectedError),
}

#[derive(Debug, Display, Clone, PartialEq, Eq, From, Error, IsVariant)]
pub enum ReadError {
    Interrupt(InterruptError),
    IO(IOError),
    IsDirectory(IsDirectoryError),
    NotReadable(NotReadableError),
    WouldBlock(WouldBlockError),
    Unexpected(UnexpectedError),
}

#[derive(Debug, Display, Clone, PartialEq, Eq, From, Error, IsVariant)]
pub enum WriteError {
    Interrupt(InterruptError),
    IO(IOError),
    NotWritable(NotWritableError),
    StorageExhausted(StorageExhaustedError),
    WouldBlock(WouldBlockError),
    Unexpected(UnexpectedError),
}

#[derive(Debug, Display, Clone, PartialEq, Eq, From, Error, IsVariant)]
pub enum CloseError {
    Interrupt(InterruptError),
    IO(IOError),
    StorageExhausted(StorageExhaustedError),
    Unexpected(UnexpectedError),
}
