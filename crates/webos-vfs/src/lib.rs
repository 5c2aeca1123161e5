//! Virtual file system for WebOS.
//!
//! A strict tree of named file/dir nodes addressed by slash-delimited
//! paths, owned by a single [`FileSystem`] controller. The whole tree is
//! serialized to JSON under one storage key after every mutation and
//! restored on startup; a snapshot that fails to parse is silently
//! discarded in favor of the built-in default tree.

mod fs;
mod node;

pub use fs::{FileSystem, split_parent};
pub use node::{FileNode, NodeId, NodeKind};
