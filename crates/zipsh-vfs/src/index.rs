//! Directory index materialized from a flat entry list.
//!
//! The whole tree lives in a `BTreeMap<String, Node>` keyed by normalized
//! absolute paths. It is built exactly once, when the archive is opened, and
//! never mutated afterward: every query walks the same tree, so repeated
//! listings of the same directory are identical by construction. File nodes
//! hold the container entry name; bytes are fetched on demand.

use std::collections::BTreeMap;

use zipsh_types::error::{Result, ZipshError};

use crate::Container;

/// What kind of node a path resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// One child of a directory, as reported by [`ArchiveIndex::readdir`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

#[derive(Debug, Clone)]
enum Node {
    /// A leaf holding the container entry name its bytes live under.
    File { entry: String },
    Dir,
}

/// Read-only directory view over a flat archive.
pub struct ArchiveIndex {
    container: Box<dyn Container>,
    /// Map of normalized absolute paths to nodes. Root `/` is always a `Dir`.
    nodes: BTreeMap<String, Node>,
    conflicts: usize,
}

/// Normalize an absolute path: leading `/`, no empty segments, no trailing
/// slash except for root. `.`/`..` are the resolver's job, not ours.
fn normalize(path: &str) -> String {
    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if parts.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", parts.join("/"))
    }
}

impl ArchiveIndex {
    /// Enumerate the container once and build the directory tree.
    ///
    /// Every intermediate segment of an entry path becomes a directory; the
    /// final segment becomes a file. A path that is simultaneously an exact
    /// entry and a strict prefix of another entry is a modeling conflict:
    /// the directory wins and the conflict is logged and counted.
    pub fn open(container: Box<dyn Container>) -> Result<Self> {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::Dir);
        let mut conflicts = 0usize;

        for entry in container.entry_paths()? {
            let segments: Vec<&str> = entry.split('/').filter(|s| !s.is_empty()).collect();
            if segments.is_empty() {
                continue;
            }
            let mut path = String::new();
            for (i, segment) in segments.iter().enumerate() {
                path.push('/');
                path.push_str(segment);
                if i + 1 == segments.len() {
                    // Leaf: file, unless an earlier entry already forced
                    // this path to be a directory.
                    if matches!(nodes.get(&path), Some(Node::Dir)) {
                        log::warn!("entry {entry} conflicts with directory {path}; keeping directory");
                        conflicts += 1;
                    } else {
                        nodes.insert(path.clone(), Node::File { entry: entry.clone() });
                    }
                } else {
                    // Intermediate: directory, displacing any file entry
                    // that claimed the same path.
                    if matches!(nodes.get(&path), Some(Node::File { .. })) {
                        log::warn!("entry {path} is both a file and a directory; keeping directory");
                        conflicts += 1;
                    }
                    nodes.insert(path.clone(), Node::Dir);
                }
            }
        }

        Ok(Self {
            container,
            nodes,
            conflicts,
        })
    }

    /// Number of file nodes in the index.
    pub fn file_count(&self) -> usize {
        self.nodes
            .values()
            .filter(|n| matches!(n, Node::File { .. }))
            .count()
    }

    /// Number of file/directory modeling conflicts found at load time.
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    /// Resolve a path to its node kind.
    pub fn stat(&self, path: &str) -> Result<EntryKind> {
        let path = normalize(path);
        match self.nodes.get(&path) {
            Some(Node::File { .. }) => Ok(EntryKind::File),
            Some(Node::Dir) => Ok(EntryKind::Directory),
            None => Err(ZipshError::NotFound(path)),
        }
    }

    /// Whether a path resolves to any node.
    pub fn exists(&self, path: &str) -> bool {
        self.nodes.contains_key(normalize(path).as_str())
    }

    /// Read the bytes of a file node from the underlying container.
    pub fn read(&mut self, path: &str) -> Result<Vec<u8>> {
        let path = normalize(path);
        let entry = match self.nodes.get(&path) {
            Some(Node::File { entry }) => entry.clone(),
            Some(Node::Dir) => return Err(ZipshError::IsADirectory(path)),
            None => return Err(ZipshError::NotFound(path)),
        };
        self.container.read_entry(&entry)
    }

    /// List the direct children of a directory, sorted by name.
    pub fn readdir(&self, path: &str) -> Result<Vec<DirEntry>> {
        let path = normalize(path);
        match self.nodes.get(&path) {
            Some(Node::Dir) => {},
            Some(Node::File { .. }) => return Err(ZipshError::NotADirectory(path)),
            None => return Err(ZipshError::NotFound(path)),
        }

        let prefix = if path == "/" {
            "/".to_string()
        } else {
            format!("{path}/")
        };

        // BTreeMap iteration is sorted by key; children of one directory
        // share the prefix, so they come out sorted by name.
        let mut entries = Vec::new();
        for (key, node) in self.nodes.range(prefix.clone()..) {
            if !key.starts_with(&prefix) {
                break;
            }
            let rest = &key[prefix.len()..];
            if !rest.is_empty() && !rest.contains('/') {
                entries.push(DirEntry {
                    name: rest.to_string(),
                    kind: match node {
                        Node::Dir => EntryKind::Directory,
                        Node::File { .. } => EntryKind::File,
                    },
                });
            }
        }
        Ok(entries)
    }

    /// Release the underlying container.
    pub fn close(self) {
        drop(self.container);
    }
}
