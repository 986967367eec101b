//! Stateful ISO9660 driver
//!
//! [`Iso9660Driver`] ties a block device to the volume state parsed from it.
//! The Primary Volume Descriptor is read exactly once, in [`Iso9660Driver::mount`];
//! every later lookup starts from the cached root extent. There is no way to
//! re-parse a mounted volume: build a new driver instead.
//!
//! The driver owns one scratch sector that every operation streams through.
//! All operations take `&mut self`, so a call can never observe another
//! call's half-filled scratch buffer. Callers that share a driver across
//! execution contexts must serialize access themselves.

use crate::directory::{self, DirectoryIterator};
use crate::error::{Iso9660Error, Result};
use crate::file;
use crate::types::{FileEntry, SectorBuf, VolumeInfo, SECTOR_SIZE};
use crate::volume;
use alloc::boxed::Box;
use alloc::vec::Vec;
use gpt_disk_io::BlockIo;

/// A mounted ISO9660 volume
pub struct Iso9660Driver<B: BlockIo> {
    block_io: B,
    volume: VolumeInfo,
    scratch: Box<SectorBuf>,
}

impl<B: BlockIo> Iso9660Driver<B> {
    /// Parse the volume descriptors on `block_io` and take ownership of it
    pub fn mount(mut block_io: B, start_sector: u64) -> Result<Self> {
        let mut scratch = Box::new([0u8; SECTOR_SIZE]);
        let volume = volume::mount(&mut block_io, start_sector, &mut scratch)?;
        Ok(Self {
            block_io,
            volume,
            scratch,
        })
    }

    /// Cached volume state
    pub fn volume(&self) -> &VolumeInfo {
        &self.volume
    }

    /// Underlying device
    pub fn device(&self) -> &B {
        &self.block_io
    }

    /// Underlying device, mutably
    pub fn device_mut(&mut self) -> &mut B {
        &mut self.block_io
    }

    /// Release the device
    pub fn into_inner(self) -> B {
        self.block_io
    }

    /// Resolve a path to its directory record
    pub fn find_entry(&mut self, path: &str) -> Result<FileEntry> {
        directory::find_file(&mut self.block_io, &self.volume, path, &mut self.scratch)
    }

    /// Read a whole file into `buffer`, returning the number of bytes copied
    pub fn read_file(&mut self, path: &str, buffer: &mut [u8]) -> Result<usize> {
        let entry = self.find_entry(path)?;
        file::read_file(
            &mut self.block_io,
            &self.volume,
            &entry,
            buffer,
            &mut self.scratch,
        )
    }

    /// Entries of a directory, self and parent records excluded
    pub fn entries(&mut self, path: &str) -> Result<Vec<FileEntry>> {
        let dir = self.find_entry(path)?;
        if !dir.is_directory() {
            return Err(Iso9660Error::NotADirectory);
        }

        DirectoryIterator::new(
            &mut self.block_io,
            &mut self.scratch,
            self.volume.start_sector,
            dir.extent_lba,
            dir.data_length,
        )
        .collect()
    }

    /// Write a directory listing into `buffer`
    ///
    /// One lowercase, newline-terminated name per entry; directories carry a
    /// trailing `/`. Listing stops at the first name that does not fit.
    /// Returns the number of bytes written.
    pub fn list_directory(&mut self, path: &str, buffer: &mut [u8]) -> Result<usize> {
        let dir = self.find_entry(path)?;
        if !dir.is_directory() {
            return Err(Iso9660Error::NotADirectory);
        }

        let iter = DirectoryIterator::new(
            &mut self.block_io,
            &mut self.scratch,
            self.volume.start_sector,
            dir.extent_lba,
            dir.data_length,
        );

        let mut used = 0;
        for result in iter {
            let entry = result?;
            let name = entry.name.as_bytes();
            let suffix = if entry.is_directory() { 2 } else { 1 };
            if used + name.len() + suffix > buffer.len() {
                break;
            }

            for (dst, src) in buffer[used..used + name.len()].iter_mut().zip(name) {
                *dst = src.to_ascii_lowercase();
            }
            used += name.len();
            if entry.is_directory() {
                buffer[used] = b'/';
                used += 1;
            }
            buffer[used] = b'\n';
            used += 1;
        }

        Ok(used)
    }
}
