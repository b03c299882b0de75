use std::collections::HashMap;

use crate::listing::{DirEntry, DirectoryLister};
use crate::registry::{GroupRegistry, LocatorError};

/// Group-scoped file locator.
///
/// Owns a [`GroupRegistry`], a [`DirectoryLister`], and two memoization
/// maps: located files keyed by `(group, fragment)` and flattened deep
/// scans keyed by group. All caches are additive for the lifetime of the
/// instance; [`FileLocator::clear_caches`] is the only invalidation.
///
/// The type is a plain value with no global registry behind it; hosts that
/// need one locator in several places pass a reference, and hosts that
/// introduce threads must guard the instance themselves.
#[derive(Debug, Default)]
pub struct FileLocator {
    registry: GroupRegistry,
    lister: DirectoryLister,
    found: HashMap<(String, String), String>,
    scans: HashMap<String, Vec<String>>,
}

impl FileLocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a base directory; see [`GroupRegistry::add`].
    pub fn add(
        &mut self,
        path: &str,
        group: Option<&str>,
        depth: Option<usize>,
    ) -> Result<&mut Self, LocatorError> {
        self.registry.add(path, group, depth)?;
        Ok(self)
    }

    pub fn set_default_depth(&mut self, depth: usize) -> &mut Self {
        self.registry.set_default_depth(depth);
        self
    }

    pub fn set_group_default_depth(&mut self, group: impl Into<String>, depth: usize) -> &mut Self {
        self.registry.set_group_default_depth(group, depth);
        self
    }

    pub fn set_working_group(&mut self, group: impl Into<String>) -> &mut Self {
        self.registry.set_working_group(group);
        self
    }

    pub fn working_group(&self) -> Option<&str> {
        self.registry.working_group()
    }

    pub fn reset_working_group(&mut self) -> &mut Self {
        self.registry.reset_working_group();
        self
    }

    /// Read-only view of the underlying registry.
    pub fn registry(&self) -> &GroupRegistry {
        &self.registry
    }

    /// Attempts to locate a file whose path contains `fragment` within the
    /// given group's directories.
    ///
    /// The first successful result per `(group, fragment)` pair is memoized
    /// and served on every later call, even if the filesystem has changed
    /// in the meantime. `Ok(None)` is the normal "no match" outcome and is
    /// not cached.
    pub fn locate(
        &mut self,
        fragment: &str,
        group: Option<&str>,
    ) -> Result<Option<String>, LocatorError> {
        let group = self.registry.resolve_group(group)?;
        let key = (group.clone(), fragment.to_string());
        if let Some(hit) = self.found.get(&key) {
            return Ok(Some(hit.clone()));
        }

        let entries = self.registry.entries(&group)?;
        for entry in entries {
            if let Some(found) =
                search_bounded(&mut self.lister, &entry.path, fragment, entry.max_depth)
            {
                self.found.insert(key, found.clone());
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    /// Searches a single directory tree without consulting the registry or
    /// the found-file cache. `max_depth` defaults to the registry's global
    /// default depth.
    pub fn search(&mut self, dir: &str, fragment: &str, max_depth: Option<usize>) -> Option<String> {
        let max_depth = max_depth.unwrap_or_else(|| self.registry.default_depth());
        search_bounded(&mut self.lister, dir, fragment, max_depth)
    }

    /// Flattens every registered directory of a group into one ordered list
    /// of paths, descending up to each entry's depth.
    ///
    /// Files are collected; directories are descended while the depth bound
    /// allows and collected as items themselves once it does not. The
    /// result is cached per group; `force` re-reads the directories it
    /// visits and replaces the cached value.
    pub fn scan(&mut self, group: Option<&str>, force: bool) -> Result<Vec<String>, LocatorError> {
        let group = self.registry.resolve_group(group)?;
        if !force {
            if let Some(cached) = self.scans.get(&group) {
                return Ok(cached.clone());
            }
        }

        let entries = self.registry.entries(&group)?.to_vec();
        let mut flattened = Vec::new();
        for entry in &entries {
            scan_bounded(
                &mut self.lister,
                &entry.path,
                entry.max_depth,
                force,
                &mut flattened,
            );
        }
        self.scans.insert(group, flattened.clone());
        Ok(flattened)
    }

    /// Drops the found-file cache, the scan cache, and every cached
    /// directory listing.
    pub fn clear_caches(&mut self) -> &mut Self {
        self.found.clear();
        self.scans.clear();
        self.lister.clear();
        self
    }
}

struct Frame {
    entries: Vec<DirEntry>,
    index: usize,
    depth: usize,
}

/// Depth-first search for the first child whose path contains `fragment`.
///
/// Children are visited in listing order; a matching path is returned the
/// moment it is seen, and a subdirectory is descended into at its position
/// in the listing while `depth < max_depth`. An explicit frame stack keeps
/// the call stack flat regardless of the configured depth.
fn search_bounded(
    lister: &mut DirectoryLister,
    dir: &str,
    fragment: &str,
    max_depth: usize,
) -> Option<String> {
    let mut stack = vec![Frame {
        entries: lister.list(dir).to_vec(),
        index: 0,
        depth: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        if frame.index >= frame.entries.len() {
            stack.pop();
            continue;
        }
        let entry = frame.entries[frame.index].clone();
        frame.index += 1;
        let child_depth = frame.depth + 1;

        if entry.path.contains(fragment) {
            return Some(entry.path);
        }
        if entry.is_dir && child_depth <= max_depth {
            stack.push(Frame {
                entries: lister.list(&entry.path).to_vec(),
                index: 0,
                depth: child_depth,
            });
        }
    }
    None
}

/// Flattens a directory tree into `out`, mirroring the traversal order of
/// [`search_bounded`]. Directories that the depth bound stops us from
/// entering are recorded as items in their own right.
fn scan_bounded(
    lister: &mut DirectoryLister,
    dir: &str,
    max_depth: usize,
    force: bool,
    out: &mut Vec<String>,
) {
    let mut stack = vec![Frame {
        entries: listed(lister, dir, force),
        index: 0,
        depth: 0,
    }];

    while let Some(frame) = stack.last_mut() {
        if frame.index >= frame.entries.len() {
            stack.pop();
            continue;
        }
        let entry = frame.entries[frame.index].clone();
        frame.index += 1;
        let child_depth = frame.depth + 1;

        if entry.is_dir && child_depth <= max_depth {
            let entries = listed(lister, &entry.path, force);
            stack.push(Frame {
                entries,
                index: 0,
                depth: child_depth,
            });
        } else {
            out.push(entry.path);
        }
    }
}

fn listed(lister: &mut DirectoryLister, dir: &str, force: bool) -> Vec<DirEntry> {
    if force {
        lister.refresh(dir).to_vec()
    } else {
        lister.list(dir).to_vec()
    }
}
