//! Sector arithmetic

use crate::types::SECTOR_SIZE;

/// Sector holding the given byte offset of an extent
pub fn byte_to_sector(byte_offset: u64) -> u32 {
    (byte_offset / SECTOR_SIZE as u64) as u32
}

/// Number of sectors needed for byte count
pub fn sectors_for_bytes(byte_count: u32) -> u32 {
    byte_count.div_ceil(SECTOR_SIZE as u32)
}

/// First byte offset of the sector after the one containing `offset`
pub fn next_sector_boundary(offset: usize) -> usize {
    (offset / SECTOR_SIZE + 1) * SECTOR_SIZE
}
