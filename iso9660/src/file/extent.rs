//! Contiguous data regions
//!
//! ISO9660 (without interleaving) stores each file in one run of sectors.

use crate::types::{FileEntry, SECTOR_SIZE};
use crate::utils::sector;
use core::ops::Range;

/// A file's run of sectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    /// First sector, relative to the image
    pub lba: u32,

    /// Bytes of data; the last sector may be partly used
    pub length: u32,
}

impl Extent {
    pub fn new(lba: u32, length: u32) -> Self {
        Self { lba, length }
    }

    /// Sectors the data occupies
    pub fn sector_count(&self) -> u32 {
        sector::sectors_for_bytes(self.length)
    }

    /// Each sector paired with the bytes of the file it carries
    pub fn chunks(&self) -> impl Iterator<Item = (u32, Range<usize>)> {
        let lba = self.lba;
        let length = self.length as usize;
        (0..self.sector_count()).map(move |i| {
            let start = i as usize * SECTOR_SIZE;
            (lba + i, start..length.min(start + SECTOR_SIZE))
        })
    }
}

impl From<&FileEntry> for Extent {
    fn from(entry: &FileEntry) -> Self {
        Self::new(entry.extent_lba, entry.data_length)
    }
}
