//! konstruct storage layer
//!
//! The kernel's view of files: a mutable in-memory tree, overlaid by read-only
//! devices mounted at path prefixes, all reached through one [`Filesystem`]
//! object.
//!
//! - [`fs`] - path normalization and the in-memory tree
//! - [`mount`] - mount table and the backend trait drivers implement
//! - [`bootdev`] - boot medium classification and sector access over INT 13h
//! - [`facade`] - the [`Filesystem`] every caller goes through
//!
//! ```ignore
//! use konstruct_core::bootdev::{BootDevice, BootParams, MemoryDisk, SectorDevice};
//! use konstruct_core::Filesystem;
//!
//! let mut fs = Filesystem::new();
//! konstruct_core::seed::seed_example_tree(&mut fs)?;
//!
//! let params = BootParams { drive_number: 0xE0, ..Default::default() };
//! let device = SectorDevice::new(BootDevice::detect(&params), MemoryDisk::new(image, 2048));
//! fs.mount_boot_device(device)?;
//!
//! let mut buf = [0u8; 512];
//! let n = fs.listdir("/cdrom", &mut buf)?;
//! ```
//!
//! Single-threaded: nothing here locks, and a driver's scratch
//! buffer assumes one call at a time.

#![no_std]

extern crate alloc;

pub mod bootdev;
pub mod error;
pub mod facade;
pub mod fs;
pub mod mount;
pub mod seed;

pub use error::{FsError, Result};
pub use facade::Filesystem;
