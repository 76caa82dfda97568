//! Path handling
//!
//! Reads take pre-split segment lists starting at the root name. Writes take
//! a `/`-separated string relative to the root.

use thiserror::Error;

/// Default file name when a write path names no file
pub const UNTITLED: &str = "untitled.txt";

/// Errors that can occur during path resolution or writes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    /// Path is empty or invalid
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Path component not found during traversal
    #[error("Not found: {0}")]
    NotFound(String),

    /// Attempted to traverse through a file
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// Expected a file, found a directory
    #[error("Is a directory: {0}")]
    IsADirectory(String),
}

/// A parsed write path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WritePath {
    /// Directory names below the root
    pub directories: Vec<String>,
    pub file_name: String,
}

/// Splits a write path into directories and a file name
///
/// Empty segments are skipped, so leading and trailing `/` do not matter.
/// A first segment equal to `root_name` names the root explicitly. An
/// empty file name becomes `untitled.txt`.
///
/// # Examples
///
/// ```
/// use vfs_tree::split_write_path;
///
/// let path = split_write_path("documents/notes.txt", "root").unwrap();
/// assert_eq!(path.directories, vec!["documents"]);
/// assert_eq!(path.file_name, "notes.txt");
///
/// let path = split_write_path("root/a/", "root").unwrap();
/// assert_eq!(path.directories, vec!["a"]);
/// assert_eq!(path.file_name, "untitled.txt");
/// ```
pub fn split_write_path(path: &str, root_name: &str) -> Result<WritePath, PathError> {
    let ends_with_separator = path.trim_end().ends_with('/');
    let mut segments: Vec<&str> = path
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    for segment in &segments {
        if *segment == "." || *segment == ".." {
            return Err(PathError::InvalidPath(
                "Relative path components (. or ..) are not supported".to_string(),
            ));
        }
    }

    if segments.first() == Some(&root_name) {
        segments.remove(0);
    }

    let file_name = if ends_with_separator {
        None
    } else {
        segments.pop()
    };

    Ok(WritePath {
        directories: segments.into_iter().map(String::from).collect(),
        file_name: file_name.unwrap_or(UNTITLED).to_string(),
    })
}

/// Joins segments for display (`root/a/b`)
pub fn display_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join("/")
}
