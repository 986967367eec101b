//! Tree nodes
//!
//! Directories own their children through id lists; every node keeps its
//! parent's id as a non-owning back-reference.

use super::arena::Id;
use alloc::string::String;
use alloc::vec::Vec;
use bitflags::bitflags;

/// Handle to a directory node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DirId(pub(crate) Id);

/// Handle to a file node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(pub(crate) Id);

bitflags! {
    /// File permission bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Permissions: u8 {
        const READ = 0x01;
        const WRITE = 0x02;
        const EXECUTE = 0x04;
    }
}

impl Permissions {
    /// Mode of a freshly created file
    pub const DEFAULT: Self = Self::READ.union(Self::WRITE);

    /// `rwx` style rendering
    pub fn as_rwx(&self) -> [u8; 3] {
        [
            if self.contains(Self::READ) { b'r' } else { b'-' },
            if self.contains(Self::WRITE) { b'w' } else { b'-' },
            if self.contains(Self::EXECUTE) { b'x' } else { b'-' },
        ]
    }
}

pub(crate) struct DirNode {
    pub name: String,
    pub files: Vec<FileId>,
    pub subdirs: Vec<DirId>,
    pub parent: Option<DirId>,
}

impl DirNode {
    pub fn new(name: String, parent: Option<DirId>) -> Self {
        Self {
            name,
            files: Vec::new(),
            subdirs: Vec::new(),
            parent,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty() && self.subdirs.is_empty()
    }
}

pub(crate) struct FileNode {
    pub name: String,
    pub perms: Permissions,
    pub data: Vec<u8>,
    pub created: u64,
    pub modified: u64,
    pub parent: DirId,
}

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
}

/// What `stat` reports about an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    /// File or directory
    pub kind: EntryKind,
    /// Byte length; zero for directories
    pub size: u64,
    /// Permission bits; directories report all bits set
    pub perms: Permissions,
    /// Creation stamp, zero where unknown
    pub created: u64,
    /// Last modification stamp, zero where unknown
    pub modified: u64,
}

impl Metadata {
    /// Metadata of a directory without stamps
    pub const fn directory() -> Self {
        Self {
            kind: EntryKind::Directory,
            size: 0,
            perms: Permissions::all(),
            created: 0,
            modified: 0,
        }
    }

    /// True for directories
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}
