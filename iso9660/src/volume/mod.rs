//! Locating the primary volume
//!
//! Descriptors occupy one sector each from sector 16 onward. Every one must
//! carry `CD001`; the scan ends at the first primary descriptor, at the set
//! terminator (type 255), or after `MAX_VOLUME_DESCRIPTORS` sectors.

pub mod primary;

use crate::error::{Iso9660Error, Result};
use crate::types::{SectorBuf, VolumeInfo, MAX_VOLUME_DESCRIPTORS, VOLUME_DESCRIPTOR_START};
use gpt_disk_io::BlockIo;
use gpt_disk_types::Lba;
use primary::{PrimaryDescriptor, TYPE_PRIMARY};

/// Descriptor type code closing the descriptor set
pub const TYPE_TERMINATOR: u8 = 255;

/// Find the primary descriptor of the image starting at `start_sector`
///
/// `scratch` receives each descriptor in turn. Boot records and
/// supplementary descriptors are skipped. A set without a primary
/// descriptor is reported as `InvalidSignature`.
pub fn mount<B: BlockIo>(
    block_io: &mut B,
    start_sector: u64,
    scratch: &mut SectorBuf,
) -> Result<VolumeInfo> {
    for index in 0..MAX_VOLUME_DESCRIPTORS {
        let sector = VOLUME_DESCRIPTOR_START + index;
        block_io
            .read_blocks(Lba(start_sector + sector), &mut scratch[..])
            .map_err(|_| Iso9660Error::IoError)?;

        if &scratch[1..6] != b"CD001" {
            log::warn!("iso9660: sector {} has no CD001 signature", sector);
            return Err(Iso9660Error::InvalidSignature);
        }

        match scratch[0] {
            TYPE_PRIMARY => {
                let pvd = PrimaryDescriptor::parse(&scratch[..])?;
                let root = pvd.root_record()?;
                let info = VolumeInfo {
                    volume_id: pvd.volume_id(),
                    root_extent_lba: root.extent_lba(),
                    root_extent_len: root.data_length(),
                    logical_block_size: pvd.logical_block_size(),
                    volume_space_size: pvd.volume_space_size(),
                    start_sector,
                };
                log::info!(
                    "iso9660: volume '{}' root at LBA {} ({} bytes)",
                    info.volume_name(),
                    info.root_extent_lba,
                    info.root_extent_len
                );
                return Ok(info);
            }
            TYPE_TERMINATOR => break,
            other => log::debug!("iso9660: skipping descriptor type {} at {}", other, sector),
        }
    }

    log::warn!("iso9660: no primary volume descriptor");
    Err(Iso9660Error::InvalidSignature)
}
