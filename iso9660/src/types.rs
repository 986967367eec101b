//! Shared constants and the types handed to callers

use alloc::string::String;

/// Bytes per logical sector; the driver does not support other block sizes
pub const SECTOR_SIZE: usize = 2048;

/// First sector of the volume descriptor set
pub const VOLUME_DESCRIPTOR_START: u64 = 16;

/// Descriptors examined before the scan gives up
pub const MAX_VOLUME_DESCRIPTORS: u64 = 100;

/// Longest path accepted by lookups, in bytes
pub const MAX_PATH_LENGTH: usize = 255;

/// Deepest directory nesting a lookup will walk
pub const MAX_DIRECTORY_DEPTH: usize = 8;

/// Scratch space for one sector
pub type SectorBuf = [u8; SECTOR_SIZE];

/// What mounting remembers about a volume
#[derive(Debug, Clone)]
pub struct VolumeInfo {
    /// Raw volume identifier, space padded
    pub volume_id: [u8; 32],

    /// First sector of the root directory, relative to the image
    pub root_extent_lba: u32,

    /// Byte length of the root directory extent
    pub root_extent_len: u32,

    pub logical_block_size: u16,

    /// Size of the volume in logical blocks
    pub volume_space_size: u32,

    /// Device sector the image begins at
    pub start_sector: u64,
}

impl VolumeInfo {
    /// Volume identifier with trailing padding removed
    pub fn volume_name(&self) -> &str {
        crate::utils::string::identifier_str(&self.volume_id).unwrap_or("")
    }
}

/// A file or directory found in a directory extent
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Identifier without the `;version` suffix
    pub name: String,

    /// Same as `data_length`, widened for callers
    pub size: u64,

    /// First sector of the entry's data
    pub extent_lba: u32,

    /// Byte length of the entry's data
    pub data_length: u32,

    pub flags: FileFlags,
}

impl FileEntry {
    /// The root directory, which has no record of its own in any listing
    pub fn root(volume: &VolumeInfo) -> Self {
        Self {
            name: String::from("/"),
            size: volume.root_extent_len as u64,
            extent_lba: volume.root_extent_lba,
            data_length: volume.root_extent_len,
            flags: FileFlags::from_bits(FileFlags::DIRECTORY),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.flags.directory
    }

    pub fn is_file(&self) -> bool {
        !self.flags.directory
    }
}

/// Decoded flag byte of a directory record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileFlags {
    /// Existence bit: the entry should not be shown to users
    pub hidden: bool,

    pub directory: bool,
}

impl FileFlags {
    /// Existence (hidden) bit
    pub const HIDDEN: u8 = 0x01;

    /// Directory bit
    pub const DIRECTORY: u8 = 0x02;

    pub fn from_bits(bits: u8) -> Self {
        Self {
            hidden: bits & Self::HIDDEN != 0,
            directory: bits & Self::DIRECTORY != 0,
        }
    }
}
