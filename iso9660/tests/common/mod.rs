//! Common test utilities and mock block devices

pub mod builder;
pub use builder::IsoBuilder;

use gpt_disk_io::BlockIo;
use gpt_disk_types::{BlockSize, Lba};
use std::io;

/// In-memory block device for testing
#[derive(Debug, Clone)]
pub struct MemoryBlockDevice {
    pub data: Vec<u8>,
    pub block_size: usize,
    /// Reads at or beyond this LBA fail
    pub fail_from: Option<u64>,
    /// Number of `read_blocks` calls served
    pub reads: usize,
}

impl MemoryBlockDevice {
    /// Create a new memory block device from raw data
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            data,
            block_size: 2048, // ISO9660 sector size
            fail_from: None,
            reads: 0,
        }
    }

    /// Make every read at or past `lba` fail
    #[allow(dead_code)]
    pub fn failing_from(mut self, lba: u64) -> Self {
        self.fail_from = Some(lba);
        self
    }
}

impl BlockIo for MemoryBlockDevice {
    type Error = io::Error;

    fn block_size(&self) -> BlockSize {
        BlockSize::new(self.block_size as u32).expect("valid block size")
    }

    fn num_blocks(&mut self) -> Result<u64, Self::Error> {
        Ok((self.data.len() / self.block_size) as u64)
    }

    fn read_blocks(&mut self, start_lba: Lba, dst: &mut [u8]) -> Result<(), Self::Error> {
        self.reads += 1;
        if matches!(self.fail_from, Some(lba) if start_lba.0 >= lba) {
            return Err(io::Error::new(io::ErrorKind::Other, "injected read fault"));
        }
        let offset = start_lba.0 as usize * self.block_size;
        if offset + dst.len() > self.data.len() {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "read beyond end of device",
            ));
        }
        dst.copy_from_slice(&self.data[offset..offset + dst.len()]);
        Ok(())
    }

    fn write_blocks(&mut self, _start_lba: Lba, _src: &[u8]) -> Result<(), Self::Error> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only medium"))
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
