//! Node and entry types

use std::fmt;
use uuid::Uuid;

/// Identifier of a node in the tree arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(Uuid);

impl NodeId {
    /// Creates a new random node ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File,
}

impl EntryKind {
    /// Listing tag (`[DIR]` / `[FILE]`)
    pub fn tag(&self) -> &'static str {
        match self {
            EntryKind::Directory => "[DIR]",
            EntryKind::File => "[FILE]",
        }
    }
}

/// A single entry in a directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: String,
    pub id: NodeId,
    pub kind: EntryKind,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<String>, id: NodeId, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            id,
            kind,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Node payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Children in insertion order
    Directory { children: Vec<DirectoryEntry> },
    File { content: String },
}

/// A node in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
}

impl Node {
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Directory {
                children: Vec::new(),
            },
        }
    }

    pub fn file(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::File {
                content: content.into(),
            },
        }
    }

    pub fn entry_kind(&self) -> EntryKind {
        match self.kind {
            NodeKind::Directory { .. } => EntryKind::Directory,
            NodeKind::File { .. } => EntryKind::File,
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, NodeKind::Directory { .. })
    }

    /// Children of a directory; empty for files
    pub fn children(&self) -> &[DirectoryEntry] {
        match &self.kind {
            NodeKind::Directory { children } => children,
            NodeKind::File { .. } => &[],
        }
    }

    /// Looks up a direct child by name
    pub fn child(&self, name: &str) -> Option<&DirectoryEntry> {
        self.children().iter().find(|e| e.name == name)
    }

    /// Content of a file
    pub fn content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::File { content } => Some(content),
            NodeKind::Directory { .. } => None,
        }
    }
}
