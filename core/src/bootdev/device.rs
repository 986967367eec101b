use super::dap::DiskAddressPacket;
use super::transport::{DiskService, STATUS_OK};
use super::{BootDevError, BootDeviceType};
use gpt_disk_io::BlockIo;
use gpt_disk_types::{BlockSize, Lba};

/// Sectors on a 1.44 MB floppy
const FLOPPY_SECTORS: u64 = 2880;

/// What the boot loader tells the kernel about its boot medium
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BootParams {
    /// BIOS drive number from DL at boot
    pub drive_number: u8,
    /// First sector of the boot partition, for hard disks
    pub partition_start: u64,
    /// Sectors in the boot partition, for hard disks
    pub partition_length: u64,
}

/// Classified boot medium
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootDevice {
    /// Medium kind
    pub kind: BootDeviceType,
    /// BIOS drive number
    pub drive_number: u8,
    /// Sector that device-relative sector 0 maps to
    pub start_sector: u64,
    /// Sectors on the device; 0 while unknown
    pub sector_count: u64,
}

impl BootDevice {
    /// Classify the boot medium from its drive number
    ///
    /// `0x00` is a floppy, `0x80` the first hard disk, `0xE0` and up a
    /// CD-ROM whose size is learned from its volume descriptor; any other
    /// number is treated as an in-memory image.
    pub fn detect(params: &BootParams) -> Self {
        let drive_number = params.drive_number;
        let (kind, start_sector, sector_count) = match drive_number {
            0x00 => (BootDeviceType::Floppy, 0, FLOPPY_SECTORS),
            0x80 => (
                BootDeviceType::Hdd,
                params.partition_start,
                params.partition_length,
            ),
            0xE0..=0xFF => (BootDeviceType::Cdrom, 0, 0),
            _ => (BootDeviceType::Memory, 0, 0),
        };

        log::info!(
            "bootdev: drive {:#04x} is a {} ({} sectors from {})",
            drive_number,
            kind.name(),
            sector_count,
            start_sector
        );

        Self {
            kind,
            drive_number,
            start_sector,
            sector_count,
        }
    }

    /// Bytes per sector
    pub const fn sector_size(&self) -> usize {
        self.kind.sector_size()
    }
}

/// Sector-level access to the boot medium
pub struct SectorDevice<T: DiskService> {
    info: BootDevice,
    transport: T,
}

impl<T: DiskService> SectorDevice<T> {
    /// Drive `info` through `transport`
    pub fn new(info: BootDevice, transport: T) -> Self {
        Self { info, transport }
    }

    /// Device description
    pub fn info(&self) -> &BootDevice {
        &self.info
    }

    /// Underlying disk service
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Record the device size once it is known; 0 lifts the bound
    pub fn set_sector_count(&mut self, count: u64) {
        self.info.sector_count = count;
    }

    fn check_request(&self, sector: u64, len: usize) -> Result<DiskAddressPacket, BootDevError> {
        if len < self.info.sector_size() {
            return Err(BootDevError::Invalid);
        }
        if self.info.sector_count != 0 && sector >= self.info.sector_count {
            return Err(BootDevError::Invalid);
        }
        let lba = self
            .info
            .start_sector
            .checked_add(sector)
            .ok_or(BootDevError::Invalid)?;
        Ok(DiskAddressPacket::read_one(lba))
    }

    /// Read device-relative `sector` into the front of `buffer`
    pub fn read_sector(&mut self, sector: u64, buffer: &mut [u8]) -> Result<(), BootDevError> {
        let packet = self.check_request(sector, buffer.len())?;
        let size = self.info.sector_size();

        let status = self
            .transport
            .extended_read(self.info.drive_number, &packet, &mut buffer[..size]);
        if status != STATUS_OK {
            log::warn!("bootdev: read of sector {} failed, status {:#04x}", sector, status);
            return Err(BootDevError::Io(status));
        }
        Ok(())
    }

    /// Write `buffer` to device-relative `sector`; CD-ROMs refuse
    pub fn write_sector(&mut self, sector: u64, buffer: &[u8]) -> Result<(), BootDevError> {
        if self.info.kind.is_read_only() {
            return Err(BootDevError::Unsupported);
        }
        let packet = self.check_request(sector, buffer.len())?;
        let size = self.info.sector_size();

        let status = self
            .transport
            .extended_write(self.info.drive_number, &packet, &buffer[..size]);
        if status != STATUS_OK {
            log::warn!("bootdev: write of sector {} failed, status {:#04x}", sector, status);
            return Err(BootDevError::Io(status));
        }
        Ok(())
    }
}

impl<T: DiskService> BlockIo for SectorDevice<T> {
    type Error = BootDevError;

    fn block_size(&self) -> BlockSize {
        BlockSize::new(self.info.sector_size() as u32).unwrap_or(BlockSize::BS_512)
    }

    fn num_blocks(&mut self) -> Result<u64, Self::Error> {
        Ok(self.info.sector_count)
    }

    fn read_blocks(&mut self, start_lba: Lba, dst: &mut [u8]) -> Result<(), Self::Error> {
        let size = self.info.sector_size();
        if dst.len() % size != 0 {
            return Err(BootDevError::Invalid);
        }
        for (i, chunk) in dst.chunks_exact_mut(size).enumerate() {
            self.read_sector(start_lba.0 + i as u64, chunk)?;
        }
        Ok(())
    }

    fn write_blocks(&mut self, start_lba: Lba, src: &[u8]) -> Result<(), Self::Error> {
        let size = self.info.sector_size();
        if src.len() % size != 0 {
            return Err(BootDevError::Invalid);
        }
        for (i, chunk) in src.chunks_exact(size).enumerate() {
            self.write_sector(start_lba.0 + i as u64, chunk)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
