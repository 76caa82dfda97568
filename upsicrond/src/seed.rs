//! Bundled seed tree

use vfs_tree::{SeedError, Vfs};

/// Seed JSON shipped with the host
pub const DEFAULT_SEED: &str = include_str!("../seed/files.json");

/// Builds the file tree from the bundled seed
pub fn default_vfs() -> Result<Vfs, SeedError> {
    Vfs::from_seed_json(DEFAULT_SEED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_seed_loads() {
        let vfs = default_vfs().unwrap();
        assert_eq!(vfs.root_name(), "root");
        let names: Vec<&str> = vfs
            .list_children(&["root"])
            .unwrap()
            .iter()
            .map(|e| e.name.as_str())
            .collect();
        assert_eq!(names, vec!["documents", "system", "empty"]);
        assert!(vfs
            .read_file(&["root", "documents", "readme.txt"])
            .unwrap()
            .starts_with("Welcome to UpsicronOS!"));
    }
}
