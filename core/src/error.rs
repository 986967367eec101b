//! Filesystem error taxonomy
//!
//! Every storage operation reports failure through [`FsError`]. Driver and
//! device errors are folded into it by the `From` impls below, so the
//! facade can use `?` across layers.

use crate::bootdev::BootDevError;
use core::fmt;
use iso9660::Iso9660Error;

/// Errors returned by the filesystem facade and the in-memory tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    /// Path does not resolve
    NotFound,
    /// Name already taken in the target directory
    Exists,
    /// Directory or file capacity exhausted
    NoSpace,
    /// Malformed argument or on-disk structure
    Invalid,
    /// Expected a directory
    NotDirectory,
    /// Expected a file
    NotFile,
    /// Missing permission bit, or removal of root / a non-empty directory
    Permission,
    /// Device read failure
    Io,
    /// Operation not available on this medium
    Unsupported,
    /// Node pool exhausted
    Memory,
}

impl FsError {
    /// Stable numeric code, as reported to the shell
    pub const fn code(&self) -> i32 {
        match self {
            Self::NotFound => -1,
            Self::Exists => -2,
            Self::NoSpace => -3,
            Self::Invalid => -4,
            Self::NotDirectory => -5,
            Self::NotFile => -6,
            Self::Permission => -7,
            Self::Io => -8,
            Self::Memory => -9,
            Self::Unsupported => -100,
        }
    }

    /// Get a human-readable description of the error
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "No such file or directory",
            Self::Exists => "File exists",
            Self::NoSpace => "No space left in directory or file",
            Self::Invalid => "Invalid argument",
            Self::NotDirectory => "Not a directory",
            Self::NotFile => "Not a file",
            Self::Permission => "Permission denied",
            Self::Io => "I/O error",
            Self::Unsupported => "Operation not supported",
            Self::Memory => "Out of memory",
        }
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Iso9660Error> for FsError {
    fn from(err: Iso9660Error) -> Self {
        match err {
            Iso9660Error::NotFound => Self::NotFound,
            Iso9660Error::IoError => Self::Io,
            Iso9660Error::InvalidSignature
            | Iso9660Error::UnsupportedVersion
            | Iso9660Error::InvalidDirectoryRecord
            | Iso9660Error::NotADirectory
            | Iso9660Error::IsADirectory
            | Iso9660Error::PathTooLong
            | Iso9660Error::BufferTooSmall => Self::Invalid,
        }
    }
}

impl From<BootDevError> for FsError {
    fn from(err: BootDevError) -> Self {
        match err {
            BootDevError::NotFound => Self::NotFound,
            BootDevError::Read | BootDevError::Io(_) => Self::Io,
            BootDevError::Write | BootDevError::Unsupported => Self::Unsupported,
            BootDevError::Invalid => Self::Invalid,
            BootDevError::Memory => Self::Memory,
        }
    }
}

/// Result type for filesystem operations
pub type Result<T> = core::result::Result<T, FsError>;
