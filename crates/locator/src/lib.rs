//! Group-scoped file location with memoized directory listings.
//!
//! Callers register base directories under named groups and then look files
//! up by partial name: the locator walks each registered directory
//! recursively up to a configured depth and returns the first path that
//! contains the requested fragment. Directory listings and located files
//! are memoized for the lifetime of the locator, so repeated lookups over
//! the same trees avoid redundant filesystem reads.
//!
//! The crate is synchronous and single-actor by design: there is no
//! internal locking, no background work, and no cache invalidation beyond
//! [`FileLocator::clear_caches`]. Hosts that share a locator across threads
//! must wrap it in their own synchronization.

pub mod listing;
pub mod locate;
pub mod path;
pub mod registry;

pub use listing::{DirEntry, DirectoryLister};
pub use locate::FileLocator;
pub use path::normalize;
pub use registry::{BaseDirEntry, GroupRegistry, LocatorError, DEFAULT_SEARCH_DEPTH};
