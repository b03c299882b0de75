use std::collections::HashMap;

use thiserror::Error;

use crate::path::normalize;

/// Recursion depth used when neither an explicit depth nor a per-group
/// default is configured.
pub const DEFAULT_SEARCH_DEPTH: usize = 3;

/// Errors raised while resolving groups. "Not found" outcomes are not
/// errors and are represented as absent values by the callers.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocatorError {
    #[error("no group given and no working group set")]
    MissingGroup,
    #[error("unknown group '{0}'")]
    UnknownGroup(String),
}

/// A registered base directory together with its recursion bound.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseDirEntry {
    /// Normalized directory path.
    pub path: String,
    /// Maximum depth the locator may descend below this directory.
    pub max_depth: usize,
}

/// Maps group names to base directories, tracks depth defaults, and holds
/// the optional ambient working group.
///
/// The working group is a single-caller convenience: when set, operations
/// that take an optional group fall back to it. The registry performs no
/// internal locking; hosts sharing one instance across threads must provide
/// their own synchronization.
#[derive(Debug)]
pub struct GroupRegistry {
    groups: HashMap<String, Vec<BaseDirEntry>>,
    group_default_depths: HashMap<String, usize>,
    default_depth: usize,
    working_group: Option<String>,
}

impl Default for GroupRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
            group_default_depths: HashMap::new(),
            default_depth: DEFAULT_SEARCH_DEPTH,
            working_group: None,
        }
    }

    /// Registers `path` under a group.
    ///
    /// The group comes from the explicit argument, falling back to the
    /// working group; with neither available the call fails. The depth
    /// falls back from the explicit argument to the group's default and
    /// then to the global default. Re-adding a path already registered in
    /// the group overwrites its depth, leaving a single entry.
    pub fn add(
        &mut self,
        path: &str,
        group: Option<&str>,
        depth: Option<usize>,
    ) -> Result<&mut Self, LocatorError> {
        let group = self.resolve_group(group)?;
        let depth = depth
            .or_else(|| self.group_default_depths.get(&group).copied())
            .unwrap_or(self.default_depth);
        let path = normalize(path);

        let entries = self.groups.entry(group).or_default();
        if let Some(existing) = entries.iter_mut().find(|entry| entry.path == path) {
            existing.max_depth = depth;
        } else {
            entries.push(BaseDirEntry { path, max_depth: depth });
        }
        Ok(self)
    }

    /// Sets the global default depth. Only affects future `add` calls.
    pub fn set_default_depth(&mut self, depth: usize) -> &mut Self {
        self.default_depth = depth;
        self
    }

    pub fn default_depth(&self) -> usize {
        self.default_depth
    }

    /// Sets the default depth for one group. Only affects future `add`
    /// calls that omit an explicit depth; existing entries are untouched.
    pub fn set_group_default_depth(&mut self, group: impl Into<String>, depth: usize) -> &mut Self {
        self.group_default_depths.insert(group.into(), depth);
        self
    }

    /// Sets the working group used when operations omit the group argument.
    pub fn set_working_group(&mut self, group: impl Into<String>) -> &mut Self {
        self.working_group = Some(group.into());
        self
    }

    pub fn working_group(&self) -> Option<&str> {
        self.working_group.as_deref()
    }

    pub fn reset_working_group(&mut self) -> &mut Self {
        self.working_group = None;
        self
    }

    /// Returns the registered entries of `group` in registration order.
    pub fn entries(&self, group: &str) -> Result<&[BaseDirEntry], LocatorError> {
        self.groups
            .get(group)
            .map(Vec::as_slice)
            .ok_or_else(|| LocatorError::UnknownGroup(group.to_string()))
    }

    /// Resolves the effective group name: the explicit argument wins over
    /// the working group.
    pub fn resolve_group(&self, explicit: Option<&str>) -> Result<String, LocatorError> {
        explicit
            .map(str::to_string)
            .or_else(|| self.working_group.clone())
            .ok_or(LocatorError::MissingGroup)
    }
}
