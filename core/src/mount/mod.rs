//! Mount points
//!
//! A mount point maps a normalized path prefix to a read-only filesystem
//! backend. Lookup walks the table in registration order and the first
//! matching prefix wins, even if a later entry would match more of the
//! path. The root prefix `/` matches everything.

mod iso;

pub use iso::IsoBackend;

use crate::bootdev::BootDeviceType;
use crate::error::{FsError, Result};
use crate::fs::limits::MAX_MOUNT_POINTS;
use crate::fs::Metadata;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// Filesystem driver behind a mount point
///
/// Paths are relative to the mount point and always start with `/`.
pub trait FsBackend {
    /// Driver name, for logs and the shell
    fn name(&self) -> &str;

    /// Read a whole file into `buf`, returning its length
    fn read_file(&mut self, path: &str, buf: &mut [u8]) -> Result<usize>;

    /// Newline-separated listing of a directory, returning bytes written
    fn list_directory(&mut self, path: &str, buf: &mut [u8]) -> Result<usize>;

    /// Describe an entry; drivers without metadata support keep the default
    fn stat(&mut self, path: &str) -> Result<Metadata> {
        let _ = path;
        Err(FsError::Unsupported)
    }
}

/// One registered mount
pub struct MountPoint {
    path: String,
    kind: BootDeviceType,
    backend: Option<Box<dyn FsBackend>>,
}

impl MountPoint {
    /// Mount prefix
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Device behind the mount
    pub fn kind(&self) -> BootDeviceType {
        self.kind
    }

    /// Name of the driver, if one is attached
    pub fn backend_name(&self) -> Option<&str> {
        self.backend.as_deref().map(|b| b.name())
    }

    /// True when the medium cannot be written
    pub fn is_read_only(&self) -> bool {
        self.kind.is_read_only()
    }

    /// Attached driver; a mount without one supports no operation
    pub fn backend_mut(&mut self) -> Result<&mut (dyn FsBackend + 'static)> {
        match self.backend.as_deref_mut() {
            Some(backend) => Ok(backend),
            None => Err(FsError::Unsupported),
        }
    }

    /// Path relative to this mount if `path` falls under it
    pub fn relative<'p>(&self, path: &'p str) -> Option<&'p str> {
        if self.path == "/" {
            return Some(path);
        }
        match path.strip_prefix(self.path.as_str())? {
            "" => Some("/"),
            rest if rest.starts_with('/') => Some(rest),
            _ => None,
        }
    }
}

/// Ordered set of mount points
#[derive(Default)]
pub struct MountTable {
    entries: Vec<MountPoint>,
}

impl MountTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mount for the normalized prefix `path`
    pub fn register(
        &mut self,
        path: &str,
        kind: BootDeviceType,
        backend: Option<Box<dyn FsBackend>>,
    ) -> Result<usize> {
        if !path.starts_with('/') {
            return Err(FsError::Invalid);
        }
        if self.entries.iter().any(|m| m.path == path) {
            return Err(FsError::Exists);
        }
        if self.entries.len() >= MAX_MOUNT_POINTS {
            return Err(FsError::NoSpace);
        }

        self.entries.push(MountPoint {
            path: String::from(path),
            kind,
            backend,
        });
        Ok(self.entries.len() - 1)
    }

    /// First mount covering `path`, with the path relative to it
    pub fn lookup<'p>(&self, path: &'p str) -> Option<(usize, &'p str)> {
        self.entries
            .iter()
            .enumerate()
            .find_map(|(idx, m)| m.relative(path).map(|rel| (idx, rel)))
    }

    /// Mount at `index`
    pub fn get_mut(&mut self, index: usize) -> Option<&mut MountPoint> {
        self.entries.get_mut(index)
    }

    /// Change the prefix of the mount at `index`, keeping its driver
    pub fn rebind(&mut self, index: usize, path: &str) -> Result<()> {
        let entry = self.entries.get_mut(index).ok_or(FsError::NotFound)?;
        entry.path = String::from(path);
        Ok(())
    }

    /// Mounts in registration order
    pub fn iter(&self) -> impl Iterator<Item = &MountPoint> {
        self.entries.iter()
    }

    /// Number of mounts
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is mounted
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every mount and its driver
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
