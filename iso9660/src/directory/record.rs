//! Directory Record structure
//!
//! Directory records describe files and subdirectories. They are variable
//! length, so the record is exposed as a bounds-checked view over the raw
//! bytes rather than a packed struct.

use crate::error::{Iso9660Error, Result};
use crate::types::FileFlags;

/// Directory Record view (variable length)
///
/// | offset | field |
/// |---|---|
/// | 0 | record length |
/// | 1 | extended attribute record length |
/// | 2..10 | extent LBA (both-endian 32-bit) |
/// | 10..18 | data length (both-endian 32-bit) |
/// | 18..25 | recording date and time |
/// | 25 | file flags |
/// | 26 | file unit size |
/// | 27 | interleave gap |
/// | 28..32 | volume sequence number (both-endian 16-bit) |
/// | 32 | file identifier length |
/// | 33.. | file identifier, padding, system use |
#[derive(Debug, Clone, Copy)]
pub struct DirectoryRecord<'a> {
    raw: &'a [u8],
}

impl<'a> DirectoryRecord<'a> {
    /// Size of the fixed part preceding the file identifier
    pub const HEADER_LENGTH: usize = 33;

    const EXTENT_LBA: usize = 2;
    const DATA_LENGTH: usize = 10;
    const FILE_FLAGS: usize = 25;
    const FILE_ID_LEN: usize = 32;

    /// Parse directory record from bytes
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        if data.len() < Self::HEADER_LENGTH {
            return Err(Iso9660Error::InvalidDirectoryRecord);
        }

        let length = data[0] as usize;
        if length < Self::HEADER_LENGTH || length > data.len() {
            return Err(Iso9660Error::InvalidDirectoryRecord);
        }

        let id_len = data[Self::FILE_ID_LEN] as usize;
        if Self::HEADER_LENGTH + id_len > length {
            return Err(Iso9660Error::InvalidDirectoryRecord);
        }

        Ok(Self {
            raw: &data[..length],
        })
    }

    /// Length of the whole record in bytes
    pub fn length(&self) -> usize {
        self.raw.len()
    }

    /// Extent LBA (little-endian half of the both-endian field)
    pub fn extent_lba(&self) -> u32 {
        Self::le_u32(&self.raw[Self::EXTENT_LBA..])
    }

    /// Data length (little-endian half)
    pub fn data_length(&self) -> u32 {
        Self::le_u32(&self.raw[Self::DATA_LENGTH..])
    }

    /// Parse file flags
    pub fn flags(&self) -> FileFlags {
        FileFlags::from_bits(self.raw[Self::FILE_FLAGS])
    }

    /// Is this a directory?
    pub fn is_directory(&self) -> bool {
        self.raw[Self::FILE_FLAGS] & FileFlags::DIRECTORY != 0
    }

    /// Get file identifier bytes
    pub fn file_identifier(&self) -> &'a [u8] {
        let len = self.raw[Self::FILE_ID_LEN] as usize;
        &self.raw[Self::HEADER_LENGTH..Self::HEADER_LENGTH + len]
    }

    /// Self (`0x00`) and parent (`0x01`) entries
    pub fn is_self_or_parent(&self) -> bool {
        matches!(self.file_identifier().first(), None | Some(0x00) | Some(0x01))
    }

    fn le_u32(bytes: &[u8]) -> u32 {
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }
}
