//! Directory record parsing and navigation

pub mod iterator;
pub mod record;

use crate::error::{Iso9660Error, Result};
use crate::types::{FileEntry, SectorBuf, VolumeInfo, MAX_DIRECTORY_DEPTH, MAX_PATH_LENGTH};
use crate::utils::string;
use alloc::vec::Vec;
use gpt_disk_io::BlockIo;

pub use iterator::DirectoryIterator;

/// Resolve `path` from the root directory
///
/// Empty and `.` components are ignored. Each remaining component is looked
/// up in the current directory's extent, case-insensitively and without the
/// `;1` version suffix, so `readme.txt` finds `README.TXT;1`. Walking
/// through a regular file is `NotADirectory`.
pub fn find_file<B: BlockIo>(
    block_io: &mut B,
    volume: &VolumeInfo,
    path: &str,
    scratch: &mut SectorBuf,
) -> Result<FileEntry> {
    if path.len() > MAX_PATH_LENGTH {
        return Err(Iso9660Error::PathTooLong);
    }

    let components: Vec<&str> = path
        .split('/')
        .filter(|c| !c.is_empty() && *c != ".")
        .collect();

    if components.len() > MAX_DIRECTORY_DEPTH {
        return Err(Iso9660Error::PathTooLong);
    }

    let mut current = FileEntry::root(volume);

    for component in components {
        if !current.is_directory() {
            return Err(Iso9660Error::NotADirectory);
        }

        let mut iter = DirectoryIterator::new(
            block_io,
            scratch,
            volume.start_sector,
            current.extent_lba,
            current.data_length,
        );

        current = iter
            .find(|entry| {
                entry
                    .as_ref()
                    .map_or(true, |e| string::names_match(&e.name, component))
            })
            .ok_or(Iso9660Error::NotFound)??;
    }

    Ok(current)
}
