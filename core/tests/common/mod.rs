//! Shared fixtures for the storage layer tests

#![allow(dead_code)]

pub mod iso;
pub use iso::IsoBuilder;

use konstruct_core::bootdev::{BootDevice, BootParams, MemoryDisk, SectorDevice};
use konstruct_core::fs::Metadata;
use konstruct_core::mount::FsBackend;
use konstruct_core::seed::seed_example_tree;
use konstruct_core::{Filesystem, Result};
use std::cell::Cell;
use std::rc::Rc;

/// Backend that serves one fixed file and counts its calls
pub struct CountingBackend {
    pub content: Vec<u8>,
    pub reads: Rc<Cell<usize>>,
    pub lists: Rc<Cell<usize>>,
    pub last_path: Rc<std::cell::RefCell<String>>,
}

impl CountingBackend {
    pub fn new(content: &[u8]) -> Self {
        Self {
            content: content.to_vec(),
            reads: Rc::new(Cell::new(0)),
            lists: Rc::new(Cell::new(0)),
            last_path: Rc::new(std::cell::RefCell::new(String::new())),
        }
    }
}

impl FsBackend for CountingBackend {
    fn name(&self) -> &str {
        "counting"
    }

    fn read_file(&mut self, path: &str, buf: &mut [u8]) -> Result<usize> {
        self.reads.set(self.reads.get() + 1);
        *self.last_path.borrow_mut() = path.to_string();
        let n = self.content.len().min(buf.len());
        buf[..n].copy_from_slice(&self.content[..n]);
        Ok(n)
    }

    fn list_directory(&mut self, path: &str, buf: &mut [u8]) -> Result<usize> {
        self.lists.set(self.lists.get() + 1);
        *self.last_path.borrow_mut() = path.to_string();
        let listing = b"file\n";
        buf[..listing.len()].copy_from_slice(listing);
        Ok(listing.len())
    }
}

/// Backend whose `stat` works, for windowed reads
pub struct StatBackend(pub CountingBackend);

impl FsBackend for StatBackend {
    fn name(&self) -> &str {
        "stat"
    }

    fn read_file(&mut self, path: &str, buf: &mut [u8]) -> Result<usize> {
        if buf.len() < self.0.content.len() {
            return Err(konstruct_core::FsError::Invalid);
        }
        self.0.read_file(path, buf)
    }

    fn list_directory(&mut self, path: &str, buf: &mut [u8]) -> Result<usize> {
        self.0.list_directory(path, buf)
    }

    fn stat(&mut self, _path: &str) -> Result<Metadata> {
        Ok(Metadata {
            kind: konstruct_core::fs::EntryKind::File,
            size: self.0.content.len() as u64,
            perms: konstruct_core::fs::Permissions::READ,
            created: 0,
            modified: 0,
        })
    }
}

/// ISO with `HELLO.TXT;1` = "hi\n" at the root
pub fn hello_image() -> Vec<u8> {
    let mut builder = IsoBuilder::new();
    builder.add_file("HELLO.TXT;1", b"hi\n");
    builder.build()
}

/// Sector device over `image` for the given BIOS drive number
pub fn device(image: Vec<u8>, drive_number: u8) -> SectorDevice<MemoryDisk> {
    let params = BootParams {
        drive_number,
        ..Default::default()
    };
    let info = BootDevice::detect(&params);
    SectorDevice::new(info, MemoryDisk::new(image, info.sector_size()))
}

/// Seeded filesystem with `image` mounted as a CD-ROM
pub fn cdrom_fs(image: Vec<u8>) -> Filesystem {
    let mut fs = Filesystem::new();
    seed_example_tree(&mut fs).expect("seed");
    fs.mount_boot_device(device(image, 0xE0)).expect("mount cdrom");
    fs
}
