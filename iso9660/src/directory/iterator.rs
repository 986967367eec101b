//! Directory iteration
//!
//! Iterator for reading directory entries sequentially out of an extent.
//! Sectors are loaded into a borrowed scratch buffer, so at most one
//! iterator can be alive per buffer.

use crate::directory::record::DirectoryRecord;
use crate::error::{Iso9660Error, Result};
use crate::types::{FileEntry, SectorBuf, SECTOR_SIZE};
use crate::utils::{sector, string};
use alloc::string::String;
use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;

/// Directory iterator
pub struct DirectoryIterator<'a, B: BlockIo> {
    block_io: &'a mut B,
    scratch: &'a mut SectorBuf,
    start_sector: u64,
    extent_lba: u32,
    extent_len: u32,
    offset: usize,
    loaded_lba: Option<u64>,
}

impl<'a, B: BlockIo> DirectoryIterator<'a, B> {
    /// Create new directory iterator
    pub fn new(
        block_io: &'a mut B,
        scratch: &'a mut SectorBuf,
        start_sector: u64,
        extent_lba: u32,
        extent_len: u32,
    ) -> Self {
        Self {
            block_io,
            scratch,
            start_sector,
            extent_lba,
            extent_len,
            offset: 0,
            loaded_lba: None,
        }
    }
}

impl<'a, B: BlockIo> Iterator for DirectoryIterator<'a, B> {
    type Item = Result<FileEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.offset >= self.extent_len as usize {
                return None;
            }

            let lba = self.start_sector
                + self.extent_lba as u64
                + sector::byte_to_sector(self.offset as u64) as u64;
            let offset_in_sector = self.offset % SECTOR_SIZE;

            if self.loaded_lba != Some(lba) {
                if self.block_io.read_blocks(Lba(lba), &mut self.scratch[..]).is_err() {
                    // Poison the iterator so a retry does not spin on the same sector
                    self.offset = self.extent_len as usize;
                    return Some(Err(Iso9660Error::IoError));
                }
                self.loaded_lba = Some(lba);
            }

            let sector_data = &self.scratch[offset_in_sector..];

            // Records never straddle sectors; a zero length byte pads the rest
            if sector_data[0] == 0 {
                self.offset = sector::next_sector_boundary(self.offset);
                continue;
            }

            let record = match DirectoryRecord::parse(sector_data) {
                Ok(r) => r,
                Err(e) => {
                    self.offset = self.extent_len as usize;
                    return Some(Err(e));
                }
            };

            self.offset += record.length();

            if record.is_self_or_parent() {
                continue;
            }

            let file_id = record.file_identifier();
            let name = match string::identifier_str(file_id) {
                Ok(s) => String::from(string::strip_version(s)),
                Err(_) => String::from_utf8_lossy(file_id).into_owned(),
            };
            scan_trace!("iso9660: record '{}' at LBA {}", name, record.extent_lba());

            return Some(Ok(FileEntry {
                name,
                size: record.data_length() as u64,
                extent_lba: record.extent_lba(),
                data_length: record.data_length(),
                flags: record.flags(),
            }));
        }
    }
}
