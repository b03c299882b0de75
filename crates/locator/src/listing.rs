use std::collections::HashMap;
use std::fs;

use crate::path::normalize;

/// Immediate child of a listed directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirEntry {
    /// Normalized path of the child (`{parent}/{file name}`).
    pub path: String,
    /// Whether the child is itself a directory the caller may descend into.
    pub is_dir: bool,
}

/// Lists immediate directory children, memoizing each listing per
/// normalized directory path.
///
/// A directory is read from the filesystem at most once for the lifetime of
/// the lister (until [`DirectoryLister::clear`]); repeated traversals of the
/// same tree therefore avoid redundant I/O at the cost of serving stale
/// listings when the filesystem changes underneath.
#[derive(Debug, Default)]
pub struct DirectoryLister {
    listings: HashMap<String, Vec<DirEntry>>,
}

impl DirectoryLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the immediate children of `dir`, reading the filesystem only
    /// on the first call for a given directory.
    ///
    /// A nonexistent or unreadable directory yields an empty listing rather
    /// than an error, and the empty result is cached like any other.
    pub fn list(&mut self, dir: &str) -> &[DirEntry] {
        let dir = normalize(dir);
        self.listings
            .entry(dir.clone())
            .or_insert_with(|| read_children(&dir))
    }

    /// Re-reads `dir` from the filesystem, replacing any cached listing.
    pub fn refresh(&mut self, dir: &str) -> &[DirEntry] {
        let dir = normalize(dir);
        let children = read_children(&dir);
        let slot = self.listings.entry(dir).or_default();
        *slot = children;
        slot
    }

    /// Drops every cached listing.
    pub fn clear(&mut self) {
        self.listings.clear();
    }

    /// Number of directories with a cached listing.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

/// Single non-recursive enumeration of `dir`. Children are sorted by path
/// so traversal order is deterministic across platforms. Entries whose file
/// type cannot be determined are treated as plain files.
fn read_children(dir: &str) -> Vec<DirEntry> {
    let read = match fs::read_dir(dir) {
        Ok(read) => read,
        Err(_) => return Vec::new(),
    };

    let mut children = Vec::new();
    for item in read.flatten() {
        let name = item.file_name().to_string_lossy().into_owned();
        let is_dir = item.file_type().map(|kind| kind.is_dir()).unwrap_or(false);
        children.push(DirEntry {
            path: format!("{dir}/{name}"),
            is_dir,
        });
    }
    children.sort_by(|a, b| a.path.cmp(&b.path));
    children
}
