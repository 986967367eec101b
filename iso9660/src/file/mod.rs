//! Reading file data

pub mod extent;

use crate::error::{Iso9660Error, Result};
use crate::types::{FileEntry, SectorBuf, VolumeInfo};
use extent::Extent;
use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;

/// Copy the whole of `file` into the front of `buffer`
///
/// Sectors pass through `scratch` one at a time, so `buffer` only needs to
/// hold the data length, not a whole number of sectors. Returns the number
/// of bytes copied.
pub fn read_file<B: BlockIo>(
    block_io: &mut B,
    volume: &VolumeInfo,
    file: &FileEntry,
    buffer: &mut [u8],
    scratch: &mut SectorBuf,
) -> Result<usize> {
    if file.is_directory() {
        return Err(Iso9660Error::IsADirectory);
    }
    if buffer.len() < file.data_length as usize {
        return Err(Iso9660Error::BufferTooSmall);
    }

    for (lba, bytes) in Extent::from(file).chunks() {
        block_io
            .read_blocks(Lba(volume.start_sector + lba as u64), &mut scratch[..])
            .map_err(|_| Iso9660Error::IoError)?;
        let len = bytes.len();
        buffer[bytes].copy_from_slice(&scratch[..len]);
    }

    Ok(file.data_length as usize)
}
