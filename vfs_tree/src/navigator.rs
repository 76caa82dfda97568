//! Navigation cursor over the tree

use crate::node::DirectoryEntry;
use crate::path::display_path;
use crate::tree::Vfs;

/// Current directory as a list of segments starting at the root name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    path: Vec<String>,
}

impl Navigator {
    /// Creates a navigator at the root
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            path: vec![root_name.into()],
        }
    }

    /// Creates a navigator at the given path
    ///
    /// The path is not checked until the next `entries` call.
    pub fn at(path: Vec<String>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// Display form (`root/a/b`)
    pub fn display(&self) -> String {
        display_path(&self.path)
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn is_at_root(&self) -> bool {
        self.path.len() <= 1
    }

    /// Returns to the root directory
    pub fn reset(&mut self, root_name: &str) {
        self.path.clear();
        self.path.push(root_name.to_string());
    }

    /// Entries of the current directory
    ///
    /// If the current path no longer resolves to a directory, navigation
    /// resets to the root and the root's entries are returned.
    pub fn entries<'a>(&mut self, vfs: &'a Vfs) -> &'a [DirectoryEntry] {
        match vfs.list_children(self.path.as_slice()) {
            Ok(entries) => entries,
            Err(err) => {
                tracing::debug!(
                    target: "vfs",
                    path = %self.display(),
                    error = %err,
                    "navigation_reset"
                );
                self.reset(vfs.root_name());
                vfs.node(vfs.root()).map(|n| n.children()).unwrap_or(&[])
            }
        }
    }

    /// Descends into a child directory
    pub fn push(&mut self, name: impl Into<String>) {
        self.path.push(name.into());
    }

    /// Goes up one level; never leaves the root
    pub fn pop(&mut self) -> bool {
        if self.is_at_root() {
            return false;
        }
        self.path.pop();
        true
    }
}
