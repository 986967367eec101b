//! Boot device access
//!
//! The medium the kernel was loaded from is classified from its BIOS drive
//! number and read one sector at a time through the legacy extended disk
//! service. The service itself sits behind [`DiskService`] so the same
//! [`SectorDevice`] runs over the real BIOS or over an in-memory image.

pub mod dap;
mod device;
pub mod transport;

pub use dap::DiskAddressPacket;
pub use device::{BootDevice, BootParams, SectorDevice};
pub use transport::{DiskService, MemoryDisk};

#[cfg(all(target_arch = "x86", target_os = "none"))]
pub use transport::BiosDisk;

use core::fmt;

/// Errors reported by the boot device layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootDevError {
    /// No usable boot device
    NotFound,
    /// Sector read failed
    Read,
    /// Sector write failed
    Write,
    /// Sector number or buffer out of range
    Invalid,
    /// Operation not available on this medium
    Unsupported,
    /// The disk service returned a non-zero status
    Io(u8),
    /// Allocation failed
    Memory,
}

impl BootDevError {
    /// Get a human-readable description of the error
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "Boot device not found",
            Self::Read => "Sector read failed",
            Self::Write => "Sector write failed",
            Self::Invalid => "Invalid sector or buffer",
            Self::Unsupported => "Operation not supported by device",
            Self::Io(_) => "Disk service error",
            Self::Memory => "Out of memory",
        }
    }
}

impl fmt::Display for BootDevError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(status) => write!(f, "{} (status {:#04x})", self.as_str(), status),
            _ => f.write_str(self.as_str()),
        }
    }
}

/// Kind of boot medium
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootDeviceType {
    /// Unclassified
    Unknown,
    /// 1.44 MB floppy
    Floppy,
    /// First hard disk
    Hdd,
    /// El Torito CD-ROM
    Cdrom,
    /// In-memory image
    Memory,
}

impl BootDeviceType {
    /// Name shown by the shell
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Cdrom => "CD-ROM",
            Self::Floppy => "Floppy Disk",
            Self::Hdd => "Hard Disk",
            Self::Memory => "Memory Disk",
            Self::Unknown => "Unknown",
        }
    }

    /// Where the device is mounted in the tree
    pub const fn mount_path(&self) -> &'static str {
        match self {
            Self::Cdrom => "/cdrom",
            _ => "/media",
        }
    }

    /// Bytes per sector
    pub const fn sector_size(&self) -> usize {
        match self {
            Self::Cdrom | Self::Memory => 2048,
            _ => 512,
        }
    }

    /// True for media that never accept writes
    pub const fn is_read_only(&self) -> bool {
        matches!(self, Self::Cdrom)
    }
}

impl fmt::Display for BootDeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
