//! Mutable in-memory directory tree
//!
//! [`VirtualFileTree`] serves every path that no mount point claims. All
//! nodes live in two arenas; directories hold the ids of their children and
//! every node records its parent's id. Removing a directory or clearing the
//! tree is a walk over ids, never over references.
//!
//! Paths handed to the public operations may be relative; they are resolved
//! against the current directory first.

use super::arena::Arena;
use super::limits::{
    DEFAULT_NODE_CAPACITY, MAX_FILES_PER_DIR, MAX_FILE_SIZE, MAX_SUBDIRS_PER_DIR,
};
use super::node::{DirId, DirNode, EntryKind, FileId, FileNode, Metadata, Permissions};
use super::path;
use crate::error::{FsError, Result};
use alloc::string::String;
use alloc::vec::Vec;

/// Hierarchical in-memory filesystem
pub struct VirtualFileTree {
    dirs: Arena<DirNode>,
    files: Arena<FileNode>,
    root: DirId,
    cwd: DirId,
    node_capacity: usize,
    clock: u64,
}

impl Default for VirtualFileTree {
    fn default() -> Self {
        Self::new()
    }
}

impl VirtualFileTree {
    /// Empty tree with the default node pool
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_NODE_CAPACITY)
    }

    /// Empty tree holding at most `node_capacity` nodes, root included
    pub fn with_capacity(node_capacity: usize) -> Self {
        let node_capacity = node_capacity.max(1);
        let (dirs, root) = Arena::with_first(node_capacity, DirNode::new(String::new(), None));
        let root = DirId(root);
        Self {
            dirs,
            files: Arena::with_capacity(node_capacity),
            root,
            cwd: root,
            node_capacity,
            clock: 0,
        }
    }

    /// Live directories and files, root included
    pub fn node_count(&self) -> usize {
        self.dirs.len() + self.files.len()
    }

    /// Resolve `path` against the current directory
    pub fn normalize_path(&self, path: &str) -> Result<String> {
        path::normalize(&self.cwd_path(), path)
    }

    /// Directory at `path`
    pub fn find_dir(&self, path: &str) -> Result<DirId> {
        let path = self.normalize_path(path)?;
        self.resolve_dir(&path)
    }

    /// File at `path`
    pub fn find_file(&self, path: &str) -> Result<FileId> {
        let path = self.normalize_path(path)?;
        self.resolve_file(&path)
    }

    /// Create an empty directory
    pub fn mkdir(&mut self, path: &str) -> Result<DirId> {
        let path = self.normalize_path(path)?;
        let (parent_path, name) = path::split_parent(&path).ok_or(FsError::Exists)?;
        let parent = self.resolve_dir(parent_path)?;

        self.check_name_free(parent, name)?;
        if self.dir(parent)?.subdirs.len() >= MAX_SUBDIRS_PER_DIR {
            return Err(FsError::NoSpace);
        }
        self.check_pool()?;

        let id = self
            .dirs
            .insert(DirNode::new(String::from(name), Some(parent)))
            .map(DirId)
            .map_err(|_| FsError::Memory)?;
        self.dir_mut(parent)?.subdirs.push(id);
        Ok(id)
    }

    /// Remove an empty directory other than the root
    ///
    /// If the current directory is removed it moves up to the parent.
    pub fn rmdir(&mut self, path: &str) -> Result<()> {
        let id = self.find_dir(path)?;
        if id == self.root {
            return Err(FsError::Permission);
        }

        let node = self.dir(id)?;
        if !node.is_empty() {
            return Err(FsError::Permission);
        }
        let parent = node.parent.ok_or(FsError::Invalid)?;

        self.dir_mut(parent)?.subdirs.retain(|&d| d != id);
        self.dirs.remove(id.0);
        if self.cwd == id {
            log::debug!("fs: current directory removed, moving to parent");
            self.cwd = parent;
        }
        Ok(())
    }

    /// Make `path` the current directory
    pub fn chdir(&mut self, path: &str) -> Result<()> {
        self.cwd = self.find_dir(path)?;
        Ok(())
    }

    /// Absolute path of the current directory
    pub fn cwd_path(&self) -> String {
        self.dir_path(self.cwd)
    }

    /// Copy the current directory into `buf`, returning its length
    pub fn getcwd(&self, buf: &mut [u8]) -> Result<usize> {
        let cwd = self.cwd_path();
        if cwd.len() > buf.len() {
            return Err(FsError::Invalid);
        }
        buf[..cwd.len()].copy_from_slice(cwd.as_bytes());
        Ok(cwd.len())
    }

    /// Write a listing of the directory at `path` into `buf`
    ///
    /// Subdirectories come first as `name/\n`, then files as `name\n`.
    /// An entry that does not fit in the remaining space is left out.
    /// Returns the number of bytes written.
    pub fn listdir(&self, path: &str, buf: &mut [u8]) -> Result<usize> {
        let dir = self.dir(self.find_dir(path)?)?;
        let mut used = 0;

        for &sub in &dir.subdirs {
            let name = self.dir(sub)?.name.as_bytes();
            used += append_entry(&mut buf[used..], name, Some(b'/'));
        }
        for &file in &dir.files {
            let name = self.file(file)?.name.as_bytes();
            used += append_entry(&mut buf[used..], name, None);
        }
        Ok(used)
    }

    /// Names in the directory at `path`, subdirectories first
    pub fn entries(&self, path: &str) -> Result<Vec<(String, EntryKind)>> {
        let dir = self.dir(self.find_dir(path)?)?;
        let mut out = Vec::with_capacity(dir.subdirs.len() + dir.files.len());
        for &sub in &dir.subdirs {
            out.push((self.dir(sub)?.name.clone(), EntryKind::Directory));
        }
        for &file in &dir.files {
            out.push((self.file(file)?.name.clone(), EntryKind::File));
        }
        Ok(out)
    }

    /// Create an empty file readable and writable by default
    pub fn create(&mut self, path: &str) -> Result<FileId> {
        let path = self.normalize_path(path)?;
        let (parent_path, name) = path::split_parent(&path).ok_or(FsError::Exists)?;
        let parent = self.resolve_dir(parent_path)?;

        self.check_name_free(parent, name)?;
        if self.dir(parent)?.files.len() >= MAX_FILES_PER_DIR {
            return Err(FsError::NoSpace);
        }
        self.check_pool()?;

        let now = self.tick();
        let node = FileNode {
            name: String::from(name),
            perms: Permissions::DEFAULT,
            data: Vec::new(),
            created: now,
            modified: now,
            parent,
        };
        let id = self
            .files
            .insert(node)
            .map(FileId)
            .map_err(|_| FsError::Memory)?;
        self.dir_mut(parent)?.files.push(id);
        Ok(id)
    }

    /// Remove a file and release its data
    pub fn delete(&mut self, path: &str) -> Result<()> {
        let id = self.find_file(path)?;
        let parent = self.file(id)?.parent;
        self.dir_mut(parent)?.files.retain(|&f| f != id);
        self.files.remove(id.0);
        Ok(())
    }

    /// Read up to `buf.len()` bytes starting at `offset`
    ///
    /// Reading at or past the end returns 0.
    pub fn read(&self, path: &str, buf: &mut [u8], offset: usize) -> Result<usize> {
        let file = self.file(self.find_file(path)?)?;
        if !file.perms.contains(Permissions::READ) {
            return Err(FsError::Permission);
        }
        if offset >= file.data.len() {
            return Ok(0);
        }

        let n = buf.len().min(file.data.len() - offset);
        buf[..n].copy_from_slice(&file.data[offset..offset + n]);
        Ok(n)
    }

    /// Write `data` at `offset`, growing the file as needed
    ///
    /// A gap between the old end and `offset` is zero-filled. Files never
    /// grow past [`MAX_FILE_SIZE`].
    pub fn write(&mut self, path: &str, data: &[u8], offset: usize) -> Result<usize> {
        let id = self.find_file(path)?;
        let now = self.tick();
        let file = self.file_mut(id)?;
        if !file.perms.contains(Permissions::WRITE) {
            return Err(FsError::Permission);
        }

        let end = offset.checked_add(data.len()).ok_or(FsError::NoSpace)?;
        if end > file.data.len() {
            if end > MAX_FILE_SIZE {
                return Err(FsError::NoSpace);
            }
            file.data
                .try_reserve(end - file.data.len())
                .map_err(|_| FsError::NoSpace)?;
            file.data.resize(end, 0);
        }

        file.data[offset..end].copy_from_slice(data);
        file.modified = now;
        Ok(data.len())
    }

    /// Size of the file at `path`
    pub fn getsize(&self, path: &str) -> Result<u64> {
        let file = self.file(self.find_file(path)?)?;
        Ok(file.data.len() as u64)
    }

    /// True if `path` names a directory or a file
    pub fn exists(&self, path: &str) -> bool {
        self.stat(path).is_ok()
    }

    /// Kind, size, permissions and stamps of the entry at `path`
    pub fn stat(&self, path: &str) -> Result<Metadata> {
        let path = self.normalize_path(path)?;
        if self.resolve_dir(&path).is_ok() {
            return Ok(Metadata::directory());
        }

        let file = self.file(self.resolve_file(&path)?)?;
        Ok(Metadata {
            kind: EntryKind::File,
            size: file.data.len() as u64,
            perms: file.perms,
            created: file.created,
            modified: file.modified,
        })
    }

    /// Replace the permission bits of a file
    pub fn set_permissions(&mut self, path: &str, perms: Permissions) -> Result<()> {
        let id = self.find_file(path)?;
        self.file_mut(id)?.perms = perms;
        Ok(())
    }

    /// Release every node below the root and return to `/`
    pub fn clear(&mut self) {
        let mut stack: Vec<DirId> = match self.dirs.get_mut(self.root.0) {
            Some(root) => {
                for file in root.files.drain(..) {
                    self.files.remove(file.0);
                }
                root.subdirs.drain(..).collect()
            }
            None => Vec::new(),
        };

        while let Some(id) = stack.pop() {
            if let Some(node) = self.dirs.remove(id.0) {
                for file in node.files {
                    self.files.remove(file.0);
                }
                stack.extend(node.subdirs);
            }
        }
        self.cwd = self.root;
    }

    fn resolve_dir(&self, path: &str) -> Result<DirId> {
        let mut current = self.root;
        for name in path::components(path) {
            current = match self.child_dir(current, name)? {
                Some(id) => id,
                None => {
                    return match self.child_file(current, name)? {
                        Some(_) => Err(FsError::NotDirectory),
                        None => Err(FsError::NotFound),
                    }
                }
            };
        }
        Ok(current)
    }

    fn resolve_file(&self, path: &str) -> Result<FileId> {
        let (parent_path, name) = path::split_parent(path).ok_or(FsError::NotFile)?;
        let parent = self.resolve_dir(parent_path)?;
        if let Some(id) = self.child_file(parent, name)? {
            return Ok(id);
        }
        match self.child_dir(parent, name)? {
            Some(_) => Err(FsError::NotFile),
            None => Err(FsError::NotFound),
        }
    }

    fn dir_path(&self, mut id: DirId) -> String {
        let mut names: Vec<&str> = Vec::new();
        while let Some(node) = self.dirs.get(id.0) {
            match node.parent {
                Some(parent) => {
                    names.push(&node.name);
                    id = parent;
                }
                None => break,
            }
        }

        if names.is_empty() {
            return String::from("/");
        }
        let mut out = String::new();
        for name in names.iter().rev() {
            out.push('/');
            out.push_str(name);
        }
        out
    }

    fn child_dir(&self, dir: DirId, name: &str) -> Result<Option<DirId>> {
        for &sub in &self.dir(dir)?.subdirs {
            if self.dir(sub)?.name == name {
                return Ok(Some(sub));
            }
        }
        Ok(None)
    }

    fn child_file(&self, dir: DirId, name: &str) -> Result<Option<FileId>> {
        for &file in &self.dir(dir)?.files {
            if self.file(file)?.name == name {
                return Ok(Some(file));
            }
        }
        Ok(None)
    }

    fn check_name_free(&self, dir: DirId, name: &str) -> Result<()> {
        if self.child_dir(dir, name)?.is_some() || self.child_file(dir, name)?.is_some() {
            return Err(FsError::Exists);
        }
        Ok(())
    }

    fn check_pool(&self) -> Result<()> {
        if self.node_count() >= self.node_capacity {
            log::warn!("fs: node pool exhausted ({} nodes)", self.node_capacity);
            return Err(FsError::Memory);
        }
        Ok(())
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn dir(&self, id: DirId) -> Result<&DirNode> {
        self.dirs.get(id.0).ok_or(FsError::NotFound)
    }

    fn dir_mut(&mut self, id: DirId) -> Result<&mut DirNode> {
        self.dirs.get_mut(id.0).ok_or(FsError::NotFound)
    }

    fn file(&self, id: FileId) -> Result<&FileNode> {
        self.files.get(id.0).ok_or(FsError::NotFound)
    }

    fn file_mut(&mut self, id: FileId) -> Result<&mut FileNode> {
        self.files.get_mut(id.0).ok_or(FsError::NotFound)
    }
}

/// Append `name`, an optional marker and a newline if all of it fits
fn append_entry(buf: &mut [u8], name: &[u8], marker: Option<u8>) -> usize {
    let len = name.len() + marker.is_some() as usize + 1;
    if len > buf.len() {
        return 0;
    }
    buf[..name.len()].copy_from_slice(name);
    let mut at = name.len();
    if let Some(m) = marker {
        buf[at] = m;
        at += 1;
    }
    buf[at] = b'\n';
    len
}
