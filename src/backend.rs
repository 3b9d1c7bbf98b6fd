//! The storage interface request handlers program against.
//!
//! Implement [`ItemStore`] to bring your own backend (an embedded database,
//! a remote service). [`MemoryStore`](crate::MemoryStore) is the built-in one.

use crate::error::Result;
use crate::item::Item;
use std::path::Path;

/// Keyed item storage with snapshot save/load.
///
/// Every method works with owned values: reads hand back clones so nothing
/// outside the store can reach into its synchronized state.
///
/// Keyed operations must reject an empty id with
/// [`Error::InvalidId`](crate::Error::InvalidId) before touching any state.
pub trait ItemStore: Send + Sync {
    /// Copy of every item at call time. Order is unspecified.
    fn get_all(&self) -> Vec<Item>;

    /// Look up one item.
    fn get(&self, id: &str) -> Result<Item>;

    /// Insert a new item. Fails if the id is already taken.
    fn create(&self, item: Item) -> Result<()>;

    /// Replace an existing item wholesale. Fails if the id is unknown.
    fn update(&self, item: Item) -> Result<()>;

    /// Remove an item. Fails if the id is unknown.
    fn delete(&self, id: &str) -> Result<()>;

    /// Write the full item set to `path`.
    fn save_snapshot(&self, path: &Path) -> Result<()>;

    /// Replace the full item set with the contents of `path`.
    fn load_snapshot(&self, path: &Path) -> Result<()>;

    /// Where this store persists itself, if anywhere.
    fn persist_path(&self) -> Option<&Path> {
        None
    }
}
