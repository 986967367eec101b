//! Driver errors

use core::fmt;

/// Shorthand used throughout the driver
pub type Result<T> = core::result::Result<T, Iso9660Error>;

/// Everything that can go wrong between the block device and a caller buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iso9660Error {
    /// The underlying device failed a read
    IoError,

    /// No `CD001` descriptor set, or it ended without a primary descriptor
    InvalidSignature,

    /// Primary descriptor version other than 1
    UnsupportedVersion,

    /// A directory record is truncated or overruns its sector
    InvalidDirectoryRecord,

    /// No entry with that name
    NotFound,

    /// A non-final path component names a regular file
    NotADirectory,

    /// A file operation was pointed at a directory
    IsADirectory,

    /// Path longer than `MAX_PATH_LENGTH` or deeper than `MAX_DIRECTORY_DEPTH`
    PathTooLong,

    /// Caller buffer cannot hold the file
    BufferTooSmall,
}

impl Iso9660Error {
    /// Short lowercase description, also used by `Display`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::IoError => "device read failed",
            Self::InvalidSignature => "no ISO9660 primary volume descriptor",
            Self::UnsupportedVersion => "unsupported volume descriptor version",
            Self::InvalidDirectoryRecord => "malformed directory record",
            Self::NotFound => "no such entry",
            Self::NotADirectory => "path component is a file",
            Self::IsADirectory => "entry is a directory",
            Self::PathTooLong => "path too long or too deep",
            Self::BufferTooSmall => "buffer smaller than file",
        }
    }
}

impl fmt::Display for Iso9660Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
