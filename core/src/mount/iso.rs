use super::FsBackend;
use crate::bootdev::{DiskService, SectorDevice};
use crate::error::Result;
use crate::fs::{EntryKind, Metadata, Permissions};
use gpt_disk_io::BlockIo;
use iso9660::{Iso9660Driver, Iso9660Error};

/// ISO9660 volume served through a mount point
pub struct IsoBackend<B: BlockIo> {
    driver: Iso9660Driver<B>,
}

impl<B: BlockIo> IsoBackend<B> {
    /// Parse the volume on `device`
    pub fn mount(device: B) -> core::result::Result<Self, Iso9660Error> {
        let driver = Iso9660Driver::mount(device, 0)?;
        log::info!(
            "iso9660: mounted volume '{}' ({} sectors)",
            driver.volume().volume_name(),
            driver.volume().volume_space_size
        );
        Ok(Self { driver })
    }

    /// Mounted driver
    pub fn driver(&self) -> &Iso9660Driver<B> {
        &self.driver
    }
}

impl<T: DiskService> IsoBackend<SectorDevice<T>> {
    /// Parse the volume on a boot device and bound the device to its size
    pub fn mount_device(device: SectorDevice<T>) -> core::result::Result<Self, Iso9660Error> {
        let mut backend = Self::mount(device)?;
        let sectors = backend.driver.volume().volume_space_size as u64;
        backend.driver.device_mut().set_sector_count(sectors);
        Ok(backend)
    }
}

impl<B: BlockIo> FsBackend for IsoBackend<B> {
    fn name(&self) -> &str {
        "iso9660"
    }

    fn read_file(&mut self, path: &str, buf: &mut [u8]) -> Result<usize> {
        Ok(self.driver.read_file(path, buf)?)
    }

    fn list_directory(&mut self, path: &str, buf: &mut [u8]) -> Result<usize> {
        Ok(self.driver.list_directory(path, buf)?)
    }

    fn stat(&mut self, path: &str) -> Result<Metadata> {
        let entry = self.driver.find_entry(path)?;
        if entry.is_directory() {
            return Ok(Metadata {
                perms: Permissions::READ | Permissions::EXECUTE,
                ..Metadata::directory()
            });
        }
        Ok(Metadata {
            kind: EntryKind::File,
            size: entry.size,
            perms: Permissions::READ,
            created: 0,
            modified: 0,
        })
    }
}
