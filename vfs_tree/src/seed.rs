//! Seed data
//!
//! The tree is seeded from a JSON literal of the form
//!
//! ```text
//! { "root": { "d": true, "c": { "notes.txt": { "d": false, "c": "hello" } } } }
//! ```
//!
//! `d` marks a directory; `c` holds either the children map or the file
//! content. Object key order is kept: listings show entries in seed order.

use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while loading seed data
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Malformed seed data: {0}")]
    Malformed(String),

    #[error("Seed must contain exactly one root directory, found {0} entries")]
    RootCount(usize),

    #[error("Seed root '{0}' is not a directory")]
    RootNotDirectory(String),
}

/// One node of seed data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedNode {
    Directory(Vec<(String, SeedNode)>),
    File(String),
}

/// Parsed seed data: the root directory and its children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedTree {
    pub root_name: String,
    pub children: Vec<(String, SeedNode)>,
}

impl SeedTree {
    /// Parses seed JSON
    pub fn from_json(text: &str) -> Result<Self, SeedError> {
        let entries: SeedEntries =
            serde_json::from_str(text).map_err(|e| SeedError::Malformed(e.to_string()))?;
        let mut entries = entries.0;
        if entries.len() != 1 {
            return Err(SeedError::RootCount(entries.len()));
        }
        match entries.pop() {
            Some((root_name, SeedNode::Directory(children))) => Ok(Self {
                root_name,
                children,
            }),
            Some((root_name, SeedNode::File(_))) => Err(SeedError::RootNotDirectory(root_name)),
            None => Err(SeedError::RootCount(0)),
        }
    }
}

/// Name → node map that keeps key order
struct SeedEntries(Vec<(String, SeedNode)>);

impl<'de> Deserialize<'de> for SeedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = SeedEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of names to seed nodes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SeedEntries, A::Error> {
                let mut entries: Vec<(String, SeedNode)> = Vec::new();
                while let Some((name, node)) = map.next_entry::<String, SeedNode>()? {
                    match entries.iter_mut().find(|(n, _)| *n == name) {
                        Some(existing) => existing.1 = node,
                        None => entries.push((name, node)),
                    }
                }
                Ok(SeedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// The `c` field: children or content
enum SeedContent {
    Children(Vec<(String, SeedNode)>),
    Text(String),
}

impl<'de> Deserialize<'de> for SeedContent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ContentVisitor;

        impl<'de> Visitor<'de> for ContentVisitor {
            type Value = SeedContent;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a children map or file content string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<SeedContent, E> {
                Ok(SeedContent::Text(v.to_string()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<SeedContent, E> {
                Ok(SeedContent::Text(v))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<SeedContent, A::Error> {
                let entries =
                    SeedEntries::deserialize(de::value::MapAccessDeserializer::new(map))?;
                Ok(SeedContent::Children(entries.0))
            }
        }

        deserializer.deserialize_any(ContentVisitor)
    }
}

impl<'de> Deserialize<'de> for SeedNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct NodeVisitor;

        impl<'de> Visitor<'de> for NodeVisitor {
            type Value = SeedNode;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a seed node {\"d\": bool, \"c\": ...}")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<SeedNode, A::Error> {
                let mut is_dir: Option<bool> = None;
                let mut content: Option<SeedContent> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "d" => is_dir = Some(map.next_value()?),
                        "c" => content = Some(map.next_value()?),
                        _ => {
                            map.next_value::<de::IgnoredAny>()?;
                        }
                    }
                }

                let is_dir = is_dir.ok_or_else(|| de::Error::missing_field("d"))?;
                match (is_dir, content) {
                    (true, Some(SeedContent::Children(children))) => {
                        Ok(SeedNode::Directory(children))
                    }
                    (true, None) => Ok(SeedNode::Directory(Vec::new())),
                    (false, Some(SeedContent::Text(text))) => Ok(SeedNode::File(text)),
                    (false, None) => Ok(SeedNode::File(String::new())),
                    (true, Some(SeedContent::Text(_))) => Err(de::Error::custom(
                        "directory node has string content",
                    )),
                    (false, Some(SeedContent::Children(_))) => {
                        Err(de::Error::custom("file node has children"))
                    }
                }
            }
        }

        deserializer.deserialize_map(NodeVisitor)
    }
}
