//! The node arena

use crate::node::{DirectoryEntry, EntryKind, Node, NodeId, NodeKind};
use crate::path::{display_path, split_write_path, PathError};
use crate::seed::{SeedError, SeedNode, SeedTree};
use std::collections::HashMap;

/// Result of a successful write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Segments of the containing directory, starting at the root name
    pub directory: Vec<String>,
    pub file_name: String,
    pub id: NodeId,
}

impl WrittenFile {
    /// Full display path (`root/documents/x.txt`)
    pub fn display(&self) -> String {
        format!("{}/{}", display_path(&self.directory), self.file_name)
    }
}

/// In-memory file tree
#[derive(Debug, Clone)]
pub struct Vfs {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
}

impl Vfs {
    /// Creates a tree with an empty root directory
    pub fn new(root_name: impl Into<String>) -> Self {
        let root = NodeId::new();
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::directory(root_name));
        Self { nodes, root }
    }

    /// Builds a tree from seed data
    pub fn from_seed(seed: &SeedTree) -> Self {
        let mut vfs = Self::new(seed.root_name.clone());
        let root = vfs.root;
        for (name, node) in &seed.children {
            vfs.insert_seed(root, name, node);
        }
        vfs
    }

    /// Builds a tree from seed JSON
    pub fn from_seed_json(text: &str) -> Result<Self, SeedError> {
        Ok(Self::from_seed(&SeedTree::from_json(text)?))
    }

    fn insert_seed(&mut self, parent: NodeId, name: &str, seed: &SeedNode) {
        match seed {
            SeedNode::File(content) => {
                self.attach(parent, Node::file(name, content.clone()));
            }
            SeedNode::Directory(children) => {
                let id = self.attach(parent, Node::directory(name));
                for (child_name, child) in children {
                    self.insert_seed(id, child_name, child);
                }
            }
        }
    }

    /// Adds `node` under `parent`, replacing a same-named child in place
    fn attach(&mut self, parent: NodeId, node: Node) -> NodeId {
        let id = NodeId::new();
        let entry = DirectoryEntry::new(node.name.clone(), id, node.entry_kind());

        let mut replaced = None;
        if let Some(Node {
            kind: NodeKind::Directory { children },
            ..
        }) = self.nodes.get_mut(&parent)
        {
            match children.iter_mut().find(|e| e.name == entry.name) {
                Some(existing) => replaced = Some(std::mem::replace(existing, entry)),
                None => children.push(entry),
            }
        }
        if let Some(old) = replaced {
            self.remove_subtree(old.id);
        }

        self.nodes.insert(id, node);
        id
    }

    fn remove_subtree(&mut self, id: NodeId) {
        if let Some(node) = self.nodes.remove(&id) {
            for child in node.children() {
                self.remove_subtree(child.id);
            }
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Name of the root directory
    pub fn root_name(&self) -> &str {
        self.nodes
            .get(&self.root)
            .map(|n| n.name.as_str())
            .unwrap_or_default()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Number of nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Resolves a segment path starting at the root name
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Result<NodeId, PathError> {
        let Some((first, rest)) = path.split_first() else {
            return Err(PathError::InvalidPath("Empty path".to_string()));
        };
        if first.as_ref() != self.root_name() {
            return Err(PathError::NotFound(first.as_ref().to_string()));
        }

        let mut current = self.root;
        for segment in rest {
            let segment = segment.as_ref();
            let node = self
                .nodes
                .get(&current)
                .ok_or_else(|| PathError::NotFound(segment.to_string()))?;
            if !node.is_dir() {
                return Err(PathError::NotADirectory(node.name.clone()));
            }
            current = node
                .child(segment)
                .map(|e| e.id)
                .ok_or_else(|| PathError::NotFound(segment.to_string()))?;
        }
        Ok(current)
    }

    /// Children of the directory at `path`, in insertion order
    pub fn list_children<S: AsRef<str>>(&self, path: &[S]) -> Result<&[DirectoryEntry], PathError> {
        let id = self.resolve(path)?;
        match self.nodes.get(&id) {
            Some(node) if node.is_dir() => Ok(node.children()),
            Some(node) => Err(PathError::NotADirectory(node.name.clone())),
            None => Err(PathError::NotFound(display_path(path))),
        }
    }

    /// Content of the file at `path`
    pub fn read_file<S: AsRef<str>>(&self, path: &[S]) -> Result<&str, PathError> {
        let id = self.resolve(path)?;
        let node = self
            .nodes
            .get(&id)
            .ok_or_else(|| PathError::NotFound(display_path(path)))?;
        node.content()
            .ok_or_else(|| PathError::IsADirectory(node.name.clone()))
    }

    /// Writes a file, creating missing directories along the way
    ///
    /// `path` is relative to the root; see `split_write_path`. An existing
    /// file is overwritten in place. A file in directory position, or a
    /// directory where the file should go, is an error and leaves the tree
    /// untouched.
    pub fn write_file(&mut self, path: &str, content: &str) -> Result<WrittenFile, PathError> {
        let root_name = self.root_name().to_string();
        let target = split_write_path(path, &root_name)?;

        self.check_write(&target.directories, &target.file_name)?;

        let mut current = self.root;
        let mut directory = vec![root_name];
        for name in &target.directories {
            let existing = self
                .nodes
                .get(&current)
                .and_then(|n| n.child(name))
                .map(|e| e.id);
            current = match existing {
                Some(id) => id,
                None => {
                    tracing::debug!(target: "vfs", dir = %name, "directory_created");
                    self.attach(current, Node::directory(name.as_str()))
                }
            };
            directory.push(name.clone());
        }

        let existing = self
            .nodes
            .get(&current)
            .and_then(|n| n.child(&target.file_name))
            .map(|e| e.id);
        let id = match existing {
            Some(id) => {
                if let Some(Node {
                    kind: NodeKind::File { content: old },
                    ..
                }) = self.nodes.get_mut(&id)
                {
                    *old = content.to_string();
                }
                id
            }
            None => self.attach(current, Node::file(target.file_name.as_str(), content)),
        };

        let written = WrittenFile {
            directory,
            file_name: target.file_name,
            id,
        };
        tracing::info!(target: "vfs", path = %written.display(), bytes = content.len(), "file_written");
        Ok(written)
    }

    fn check_write(&self, directories: &[String], file_name: &str) -> Result<(), PathError> {
        let mut current = Some(self.root);
        for name in directories {
            let Some(id) = current else {
                return Ok(());
            };
            current = match self.nodes.get(&id).and_then(|n| n.child(name)) {
                Some(entry) if entry.kind == EntryKind::File => {
                    return Err(PathError::NotADirectory(name.clone()));
                }
                Some(entry) => Some(entry.id),
                None => None,
            };
        }

        if let Some(id) = current {
            if let Some(entry) = self.nodes.get(&id).and_then(|n| n.child(file_name)) {
                if entry.is_dir() {
                    return Err(PathError::IsADirectory(file_name.to_string()));
                }
            }
        }
        Ok(())
    }
}

impl Default for Vfs {
    fn default() -> Self {
        Self::new("root")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vfs {
        let mut vfs = Vfs::new("root");
        vfs.write_file("documents/readme.txt", "hello").unwrap();
        vfs.write_file("music/song.txt", "la la").unwrap();
        vfs
    }

    #[test]
    fn test_new_has_empty_root() {
        let vfs = Vfs::new("root");
        assert_eq!(vfs.root_name(), "root");
        assert!(vfs.list_children(&["root"]).unwrap().is_empty());
        assert_eq!(vfs.node_count(), 1);
    }

    #[test]
    fn test_resolve_root() {
        let vfs = sample();
        assert_eq!(vfs.resolve(&["root"]).unwrap(), vfs.root());
    }

    #[test]
    fn test_resolve_is_strict() {
        let vfs = sample();
        assert!(matches!(
            vfs.resolve(&["root", "missing"]),
            Err(PathError::NotFound(_))
        ));
        assert!(matches!(
            vfs.resolve(&["other"]),
            Err(PathError::NotFound(_))
        ));
        assert!(vfs.resolve::<&str>(&[]).is_err());
        assert!(matches!(
            vfs.resolve(&["root", "documents", "readme.txt", "deeper"]),
            Err(PathError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_list_children_insertion_order() {
        let mut vfs = sample();
        vfs.write_file("alpha.txt", "").unwrap();
        let names: Vec<_> = vfs
            .list_children(&["root"])
            .unwrap()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["documents", "music", "alpha.txt"]);
    }

    #[test]
    fn test_list_children_of_file_fails() {
        let vfs = sample();
        assert!(matches!(
            vfs.list_children(&["root", "music", "song.txt"]),
            Err(PathError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_write_creates_directories() {
        let mut vfs = Vfs::new("root");
        let written = vfs.write_file("a/b/c.txt", "deep").unwrap();
        assert_eq!(written.directory, vec!["root", "a", "b"]);
        assert_eq!(written.display(), "root/a/b/c.txt");
        assert_eq!(vfs.read_file(&["root", "a", "b", "c.txt"]).unwrap(), "deep");
        assert_eq!(vfs.node_count(), 4);
    }

    #[test]
    fn test_write_overwrites_in_place() {
        let mut vfs = sample();
        vfs.write_file("root/documents/readme.txt", "changed").unwrap();
        let children = vfs.list_children(&["root", "documents"]).unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(
            vfs.read_file(&["root", "documents", "readme.txt"]).unwrap(),
            "changed"
        );
    }

    #[test]
    fn test_write_through_file_fails_without_side_effects() {
        let mut vfs = sample();
        let before = vfs.node_count();
        let result = vfs.write_file("music/song.txt/verse.txt", "x");
        assert!(matches!(result, Err(PathError::NotADirectory(_))));
        assert_eq!(vfs.node_count(), before);
    }

    #[test]
    fn test_write_over_directory_fails() {
        let mut vfs = sample();
        assert!(matches!(
            vfs.write_file("documents", "x"),
            Err(PathError::IsADirectory(_))
        ));
    }

    #[test]
    fn test_read_directory_fails() {
        let vfs = sample();
        assert!(matches!(
            vfs.read_file(&["root", "documents"]),
            Err(PathError::IsADirectory(_))
        ));
    }
}
