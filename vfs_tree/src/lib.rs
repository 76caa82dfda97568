//! # VFS Tree
//!
//! The in-memory directory/file tree used by the Files and Notepad apps.
//!
//! ## Philosophy
//!
//! - **One root**: Every path starts at a single named root directory
//! - **Strict reads, lenient writes**: Resolving a missing path fails;
//!   writing a file creates missing directories on the way
//! - **Owned arena**: Nodes live in the tree for the life of the process and
//!   are addressed by id, never by shared references into seed data
//!
//! ## Example
//!
//! ```
//! use vfs_tree::Vfs;
//!
//! let mut vfs = Vfs::new("root");
//! vfs.write_file("documents/x.txt", "hi").unwrap();
//! assert_eq!(vfs.read_file(&["root", "documents", "x.txt"]).unwrap(), "hi");
//! ```

pub mod navigator;
pub mod node;
pub mod path;
pub mod seed;
pub mod tree;

pub use navigator::Navigator;
pub use node::{DirectoryEntry, EntryKind, Node, NodeId, NodeKind};
pub use path::{display_path, split_write_path, PathError, WritePath, UNTITLED};
pub use seed::{SeedError, SeedNode, SeedTree};
pub use tree::{Vfs, WrittenFile};
