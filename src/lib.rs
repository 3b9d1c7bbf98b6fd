//! Small CRUD service over a concurrent in-memory item store.
//!
//! The store keeps items in a `RwLock<HashMap>` and can mirror them to a JSON
//! snapshot file, either on demand or automatically in the background after
//! each mutation. The [`http`] module puts a JSON API in front of any
//! [`ItemStore`].
//!
//! ```rust,no_run
//! use item_store::{Item, ItemStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! store.create(Item::new("a", "Widget", "blue")).unwrap();
//! assert_eq!(store.get("a").unwrap().name, "Widget");
//! store.save_snapshot(std::path::Path::new("items.json")).unwrap();
//! ```
//!
//! **Single-process only.** Two processes pointed at the same snapshot file
//! will overwrite each other's writes.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod config;
pub mod error;
pub mod flush;
pub mod http;
pub mod item;
pub mod logging;
pub mod persist;
pub mod serializer;
pub mod store;

pub use backend::ItemStore;
pub use config::StoreConfig;
pub use error::{Error, Result};
pub use item::{Item, ItemInput};
pub use store::{MemoryStore, MemoryStoreBuilder};
