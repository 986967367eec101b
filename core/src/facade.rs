//! Filesystem facade
//!
//! [`Filesystem`] is the one object the shell and the program loader talk
//! to. Every operation normalizes its path against the current directory,
//! asks the mount table whether a mount covers it and then hands the
//! request either to that mount's backend or to the in-memory tree.
//!
//! Backends are read-only. Mutating a path under a mount fails with
//! [`FsError::Unsupported`], as does any operation on a mount that has no
//! driver attached.

use crate::bootdev::{BootDeviceType, DiskService, SectorDevice};
use crate::error::{FsError, Result};
use crate::fs::{Metadata, Permissions, VirtualFileTree};
use crate::mount::{FsBackend, IsoBackend, MountPoint, MountTable};
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

macro_rules! dispatch_trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "trace")]
        log::trace!($($arg)*);
    };
}

/// The in-memory tree overlaid with mounted devices
pub struct Filesystem {
    tree: VirtualFileTree,
    mounts: MountTable,
    boot_mounted: bool,
}

impl Default for Filesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem {
    /// Empty tree, nothing mounted
    pub fn new() -> Self {
        Self::with_tree(VirtualFileTree::new())
    }

    /// Serve `tree`, nothing mounted
    pub fn with_tree(tree: VirtualFileTree) -> Self {
        Self {
            tree,
            mounts: MountTable::new(),
            boot_mounted: false,
        }
    }

    /// The in-memory tree
    pub fn tree(&self) -> &VirtualFileTree {
        &self.tree
    }

    /// Resolve `path` against the current directory
    pub fn normalize_path(&self, path: &str) -> Result<String> {
        self.tree.normalize_path(path)
    }

    /// Create a directory
    pub fn mkdir(&mut self, path: &str) -> Result<()> {
        let path = self.writable_path(path)?;
        self.tree.mkdir(&path).map(|_| ())
    }

    /// Remove an empty directory
    pub fn rmdir(&mut self, path: &str) -> Result<()> {
        let path = self.writable_path(path)?;
        self.tree.rmdir(&path)
    }

    /// Change the current directory
    ///
    /// A mount point itself is entered through its directory in the tree;
    /// directories inside a mounted volume cannot become current.
    pub fn chdir(&mut self, path: &str) -> Result<()> {
        let path = self.normalize_path(path)?;
        if let Some((_, rel)) = self.mounts.lookup(&path) {
            if rel != "/" {
                return Err(FsError::Unsupported);
            }
        }
        self.tree.chdir(&path)
    }

    /// Copy the current directory into `buf`, returning its length
    pub fn getcwd(&self, buf: &mut [u8]) -> Result<usize> {
        self.tree.getcwd(buf)
    }

    /// Absolute path of the current directory
    pub fn cwd(&self) -> String {
        self.tree.cwd_path()
    }

    /// Write a newline-separated listing of `path` into `buf`
    pub fn listdir(&mut self, path: &str, buf: &mut [u8]) -> Result<usize> {
        let path = self.normalize_path(path)?;
        match self.mounts.lookup(&path) {
            Some((idx, rel)) => {
                dispatch_trace!("fs: listdir {} -> mount {} at {}", path, idx, rel);
                self.backend(idx)?.list_directory(rel, buf)
            }
            None => self.tree.listdir(&path, buf),
        }
    }

    /// Create an empty file
    pub fn create(&mut self, path: &str) -> Result<()> {
        let path = self.writable_path(path)?;
        self.tree.create(&path).map(|_| ())
    }

    /// Remove a file
    pub fn delete(&mut self, path: &str) -> Result<()> {
        let path = self.writable_path(path)?;
        self.tree.delete(&path)
    }

    /// Read up to `buf.len()` bytes of `path` starting at `offset`
    pub fn read(&mut self, path: &str, buf: &mut [u8], offset: usize) -> Result<usize> {
        let path = self.normalize_path(path)?;
        match self.mounts.lookup(&path) {
            Some((idx, rel)) => {
                dispatch_trace!("fs: read {} -> mount {} at {}", path, idx, rel);
                read_window(self.backend(idx)?, rel, buf, offset)
            }
            None => self.tree.read(&path, buf, offset),
        }
    }

    /// Write `data` to `path` at `offset`
    pub fn write(&mut self, path: &str, data: &[u8], offset: usize) -> Result<usize> {
        let path = self.writable_path(path)?;
        self.tree.write(&path, data, offset)
    }

    /// Size of the file at `path`
    pub fn getsize(&mut self, path: &str) -> Result<u64> {
        let meta = self.stat(path)?;
        if meta.is_dir() {
            return Err(FsError::NotFile);
        }
        Ok(meta.size)
    }

    /// True if `path` names a file or directory
    pub fn exists(&mut self, path: &str) -> bool {
        self.stat(path).is_ok()
    }

    /// Describe the entry at `path`
    ///
    /// Under a mount the backend answers; if it cannot describe entries the
    /// tree's view (the mount point directory) is used instead.
    pub fn stat(&mut self, path: &str) -> Result<Metadata> {
        let path = self.normalize_path(path)?;
        if let Some((idx, rel)) = self.mounts.lookup(&path) {
            match self.backend(idx).and_then(|b| b.stat(rel)) {
                Err(FsError::Unsupported) => {}
                other => return other,
            }
        }
        self.tree.stat(&path)
    }

    /// Replace the permission bits of a file
    pub fn set_permissions(&mut self, path: &str, perms: Permissions) -> Result<()> {
        let path = self.writable_path(path)?;
        self.tree.set_permissions(&path, perms)
    }

    /// Read a whole file from offset 0
    ///
    /// Tree files that do not fit in `buf` are rejected as invalid, the same
    /// way a mounted driver rejects a short buffer.
    pub fn read_file(&mut self, path: &str, buf: &mut [u8]) -> Result<usize> {
        let path = self.normalize_path(path)?;
        match self.mounts.lookup(&path) {
            Some((idx, rel)) => self.backend(idx)?.read_file(rel, buf),
            None => {
                if self.tree.getsize(&path)? > buf.len() as u64 {
                    return Err(FsError::Invalid);
                }
                self.tree.read(&path, buf, 0)
            }
        }
    }

    /// Read a program image from the boot device
    ///
    /// Programs only come from mounted media: without a mounted boot device,
    /// or for a path outside every mount, this is `NotFound`.
    pub fn load_program(&mut self, path: &str, buf: &mut [u8]) -> Result<usize> {
        if !self.boot_mounted {
            log::warn!("fs: no boot device mounted, cannot load {}", path);
            return Err(FsError::NotFound);
        }

        let path = self.normalize_path(path)?;
        let (idx, rel) = self.mounts.lookup(&path).ok_or(FsError::NotFound)?;
        self.backend(idx)?.read_file(rel, buf)
    }

    /// Attach `backend` at `path`, creating the mount point directory
    pub fn mount(
        &mut self,
        path: &str,
        kind: BootDeviceType,
        backend: Option<Box<dyn FsBackend>>,
    ) -> Result<()> {
        let path = self.normalize_path(path)?;
        self.ensure_mount_dir(&path)?;
        self.mounts.register(&path, kind, backend)?;
        log::info!("fs: mounted {} at {}", kind.name(), path);
        Ok(())
    }

    /// Mount the boot medium at its conventional path
    ///
    /// CD-ROMs must carry an ISO9660 volume. Memory images are probed for
    /// one. Floppies and hard disks are mounted without a driver.
    pub fn mount_boot_device<T>(&mut self, device: SectorDevice<T>) -> Result<()>
    where
        T: DiskService + 'static,
    {
        let kind = device.info().kind;
        let backend: Option<Box<dyn FsBackend>> = match kind {
            BootDeviceType::Cdrom => Some(Box::new(IsoBackend::mount_device(device)?)),
            BootDeviceType::Memory => match IsoBackend::mount_device(device) {
                Ok(iso) => Some(Box::new(iso)),
                Err(err) => {
                    log::info!("fs: memory disk has no ISO9660 volume: {}", err);
                    None
                }
            },
            _ => {
                log::info!("fs: no filesystem driver for {}", kind.name());
                None
            }
        };

        self.mount(kind.mount_path(), kind, backend)?;
        self.boot_mounted = true;
        Ok(())
    }

    /// Move the boot device's mount to `new_path`
    ///
    /// Only the prefix changes. The device is not re-detected and its
    /// volume is not parsed again.
    pub fn remount(&mut self, new_path: &str) -> Result<()> {
        if self.mounts.is_empty() {
            return Err(FsError::NotFound);
        }

        let path = self.normalize_path(new_path)?;
        self.ensure_mount_dir(&path)?;
        self.mounts.rebind(0, &path)?;
        log::info!("fs: remounted boot device to {}", path);
        Ok(())
    }

    /// True once the boot medium is mounted
    pub fn is_boot_mounted(&self) -> bool {
        self.boot_mounted
    }

    /// Mounts in registration order
    pub fn mounts(&self) -> impl Iterator<Item = &MountPoint> {
        self.mounts.iter()
    }

    /// Drop every mount and every node of the tree
    pub fn shutdown(&mut self) {
        self.mounts.clear();
        self.tree.clear();
        self.boot_mounted = false;
        log::info!("fs: shut down");
    }

    fn backend(&mut self, idx: usize) -> Result<&mut (dyn FsBackend + 'static)> {
        self.mounts
            .get_mut(idx)
            .ok_or(FsError::NotFound)?
            .backend_mut()
    }

    /// Normalize `path` and refuse it if a mount covers it
    fn writable_path(&self, path: &str) -> Result<String> {
        let path = self.normalize_path(path)?;
        if self.mounts.lookup(&path).is_some() {
            return Err(FsError::Unsupported);
        }
        Ok(path)
    }

    fn ensure_mount_dir(&mut self, path: &str) -> Result<()> {
        if path == "/" {
            return Ok(());
        }
        match self.tree.find_dir(path) {
            Ok(_) => Ok(()),
            Err(FsError::NotFound) => self.tree.mkdir(path).map(|_| ()),
            Err(err) => Err(err),
        }
    }
}

/// Serve a windowed read from a backend that only reads whole files
fn read_window(
    backend: &mut dyn FsBackend,
    rel: &str,
    buf: &mut [u8],
    offset: usize,
) -> Result<usize> {
    let size = match backend.stat(rel) {
        Ok(meta) if meta.is_dir() => return Err(FsError::NotFile),
        Ok(meta) => meta.size,
        Err(FsError::Unsupported) if offset == 0 => return backend.read_file(rel, buf),
        Err(err) => return Err(err),
    };

    if offset == 0 && buf.len() as u64 >= size {
        return backend.read_file(rel, buf);
    }
    if offset as u64 >= size {
        return Ok(0);
    }

    let size = usize::try_from(size).map_err(|_| FsError::Memory)?;
    let mut whole = Vec::new();
    whole.try_reserve_exact(size).map_err(|_| FsError::Memory)?;
    whole.resize(size, 0);
    let len = backend.read_file(rel, &mut whole)?;

    let end = len.min(offset.saturating_add(buf.len()));
    let n = end.saturating_sub(offset);
    buf[..n].copy_from_slice(&whole[offset..offset + n]);
    Ok(n)
}
