//! In-memory filesystem
//!
//! - `path` - lexical path normalization
//! - `arena` - generational node storage
//! - `node` - directory and file nodes
//! - `tree` - the mutable tree and its operations

mod arena;
pub mod limits;
pub mod node;
pub mod path;
pub mod tree;

pub use arena::{Arena, Id};
pub use node::{DirId, EntryKind, FileId, Metadata, Permissions};
pub use tree::VirtualFileTree;
