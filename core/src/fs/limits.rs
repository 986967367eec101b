//! Fixed capacities of the in-memory tree and the mount table

/// Longest file or directory name, in bytes
pub const MAX_NAME_LEN: usize = 31;

/// Longest normalized path, in bytes
pub const MAX_PATH_LEN: usize = 256;

/// Files per directory
pub const MAX_FILES_PER_DIR: usize = 64;

/// Subdirectories per directory
pub const MAX_SUBDIRS_PER_DIR: usize = 16;

/// Largest file the tree will hold
pub const MAX_FILE_SIZE: usize = 64 * 1024;

/// Registered mount points
pub const MAX_MOUNT_POINTS: usize = 10;

/// Default node pool size (directories and files together)
pub const DEFAULT_NODE_CAPACITY: usize = 1024;
