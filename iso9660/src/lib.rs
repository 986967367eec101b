//! ISO9660 Filesystem Driver
//!
//! A `no_std`, read-only implementation of the ISO9660 filesystem used by the
//! kernel to serve files from a CD-ROM boot medium.
//!
//! # Architecture
//!
//! The implementation is layered:
//! 1. **Volume layer** - Locates the Primary Volume Descriptor from sector 16 on
//! 2. **Directory layer** - Walks directory records extent by extent
//! 3. **File layer** - Streams file data out of its extent
//! 4. **Driver** - Owns the device, the cached volume state and the scratch sector
//!
//! # Usage
//!
//! ```ignore
//! use iso9660::Iso9660Driver;
//!
//! // Parse the volume once; the driver keeps the root extent cached
//! let mut driver = Iso9660Driver::mount(block_io, 0)?;
//!
//! // Names match case-insensitively and ignore the ";1" version suffix
//! let mut buf = [0u8; 4096];
//! let n = driver.read_file("/boot/readme.txt", &mut buf)?;
//!
//! // One newline-terminated name per entry, directories end with '/'
//! let n = driver.list_directory("/", &mut buf)?;
//! ```

#![no_std]

extern crate alloc;

macro_rules! scan_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "trace")]
        log::trace!($($arg)*);
    };
}

pub mod directory;
pub mod driver;
pub mod error;
pub mod file;
pub mod types;
pub mod utils;
pub mod volume;

pub use driver::Iso9660Driver;
pub use error::{Iso9660Error, Result};
pub use types::{FileEntry, FileFlags, SectorBuf, VolumeInfo, SECTOR_SIZE};

// Lower-level API exports
pub use directory::find_file;
pub use file::read_file;
pub use volume::mount;
