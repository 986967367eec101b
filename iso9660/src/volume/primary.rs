//! Primary Volume Descriptor
//!
//! Only the fields the driver consumes are exposed. Multi-byte numbers are
//! stored both-endian (LE copy then BE copy); the LE half is read.

use crate::directory::record::DirectoryRecord;
use crate::error::{Iso9660Error, Result};
use crate::types::SECTOR_SIZE;

const TYPE_CODE: usize = 0;
const IDENTIFIER: core::ops::Range<usize> = 1..6;
const VERSION: usize = 6;
const VOLUME_ID: core::ops::Range<usize> = 40..72;
const VOLUME_SPACE_SIZE: usize = 80;
const LOGICAL_BLOCK_SIZE: usize = 128;
const ROOT_RECORD: core::ops::Range<usize> = 156..190;

/// Descriptor type code of a primary volume descriptor
pub const TYPE_PRIMARY: u8 = 1;

/// Validated view over a descriptor sector holding a PVD
#[derive(Debug, Clone, Copy)]
pub struct PrimaryDescriptor<'a> {
    raw: &'a [u8],
}

impl<'a> PrimaryDescriptor<'a> {
    /// Check type, `CD001` and version, then wrap `sector`
    pub fn parse(sector: &'a [u8]) -> Result<Self> {
        if sector.len() < SECTOR_SIZE
            || sector[TYPE_CODE] != TYPE_PRIMARY
            || &sector[IDENTIFIER] != b"CD001"
        {
            return Err(Iso9660Error::InvalidSignature);
        }
        if sector[VERSION] != 1 {
            return Err(Iso9660Error::UnsupportedVersion);
        }
        Ok(Self { raw: sector })
    }

    /// 32 d-characters, space padded
    pub fn volume_id(&self) -> [u8; 32] {
        let mut id = [0u8; 32];
        id.copy_from_slice(&self.raw[VOLUME_ID]);
        id
    }

    /// Number of logical blocks in the volume
    pub fn volume_space_size(&self) -> u32 {
        let b = &self.raw[VOLUME_SPACE_SIZE..VOLUME_SPACE_SIZE + 4];
        u32::from_le_bytes([b[0], b[1], b[2], b[3]])
    }

    /// Logical block size in bytes, normally 2048
    pub fn logical_block_size(&self) -> u16 {
        let b = &self.raw[LOGICAL_BLOCK_SIZE..LOGICAL_BLOCK_SIZE + 2];
        u16::from_le_bytes([b[0], b[1]])
    }

    /// The 34-byte directory record of the root directory
    pub fn root_record(&self) -> Result<DirectoryRecord<'a>> {
        DirectoryRecord::parse(&self.raw[ROOT_RECORD])
    }
}
