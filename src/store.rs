//! In-memory store and its builder.

use crate::backend::ItemStore;
use crate::config::StoreConfig;
use crate::error::{Error, Result};
use crate::flush::PersistWorker;
use crate::item::Item;
use crate::persist::{atomic_write, load};
use crate::serializer::{JsonCodec, SnapshotCodec};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

type ItemMap = RwLock<HashMap<String, Item>>;

/// Concurrency-safe item store with optional JSON snapshot persistence.
///
/// Use [`new`](Self::new) for a purely in-memory store, or
/// [`builder`](Self::builder) / [`from_config`](Self::from_config) for one
/// that loads from and saves to a file.
///
/// ```rust,no_run
/// use item_store::{Item, ItemStore, MemoryStore};
///
/// let store = MemoryStore::builder()
///     .persist_path("items.json")
///     .auto_save(true)
///     .build()
///     .unwrap();
/// store.create(Item::new("a", "Widget", "")).unwrap();
/// ```
///
/// A single reader-writer lock guards the map. Writers hold it only for the
/// map mutation itself; snapshot I/O always happens after it is released.
pub struct MemoryStore {
    items: Arc<ItemMap>,
    path: Option<PathBuf>,
    codec: JsonCodec,
    disk: Arc<Mutex<()>>,
    worker: Option<PersistWorker>,
}

impl MemoryStore {
    /// Empty store with no persistence.
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
            path: None,
            codec: JsonCodec::default(),
            disk: Arc::new(Mutex::new(())),
            worker: None,
        }
    }

    /// Start configuring a store. Call [`.build()`](MemoryStoreBuilder::build)
    /// when ready.
    pub fn builder() -> MemoryStoreBuilder {
        MemoryStoreBuilder::new()
    }

    /// Build a store from [`StoreConfig`]. An empty `persist_path` gives an
    /// in-memory store.
    pub fn from_config(config: &StoreConfig) -> Result<Self> {
        let mut builder = Self::builder().auto_save(config.auto_save);
        if let Some(path) = config.path() {
            builder = builder.persist_path(path);
        }
        builder.build()
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// `true` when the store holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` when mutations schedule a background snapshot write.
    #[must_use]
    pub fn auto_save(&self) -> bool {
        self.worker.is_some()
    }

    fn notify_mutation(&self) {
        if let Some(worker) = &self.worker {
            worker.trigger();
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore for MemoryStore {
    fn get_all(&self) -> Vec<Item> {
        self.items.read().values().cloned().collect()
    }

    fn get(&self, id: &str) -> Result<Item> {
        if id.is_empty() {
            return Err(Error::InvalidId);
        }
        self.items
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn create(&self, item: Item) -> Result<()> {
        if item.id.is_empty() {
            return Err(Error::InvalidId);
        }
        {
            let mut items = self.items.write();
            if items.contains_key(&item.id) {
                return Err(Error::AlreadyExists(item.id));
            }
            items.insert(item.id.clone(), item);
        }
        self.notify_mutation();
        Ok(())
    }

    fn update(&self, item: Item) -> Result<()> {
        if item.id.is_empty() {
            return Err(Error::InvalidId);
        }
        {
            let mut items = self.items.write();
            match items.get_mut(&item.id) {
                Some(slot) => *slot = item,
                None => return Err(Error::NotFound(item.id)),
            }
        }
        self.notify_mutation();
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(Error::InvalidId);
        }
        if self.items.write().remove(id).is_none() {
            return Err(Error::NotFound(id.to_string()));
        }
        self.notify_mutation();
        Ok(())
    }

    fn save_snapshot(&self, path: &Path) -> Result<()> {
        write_snapshot(&self.items, &self.disk, path, &self.codec)
    }

    fn load_snapshot(&self, path: &Path) -> Result<()> {
        let loaded = load(path, &self.codec)?;
        let count = loaded.len();
        let fresh: HashMap<String, Item> = loaded
            .into_iter()
            .map(|item| (item.id.clone(), item))
            .collect();
        *self.items.write() = fresh;
        info!(path = %path.display(), items = count, "loaded snapshot");
        Ok(())
    }

    fn persist_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStore")
            .field("path", &self.path)
            .field("auto_save", &self.auto_save())
            .finish_non_exhaustive()
    }
}

/// Copy the items out under the read lock, then encode and write with the
/// lock released. The disk mutex keeps writes to one store in copy order.
fn write_snapshot(items: &ItemMap, disk: &Mutex<()>, path: &Path, codec: &JsonCodec) -> Result<()> {
    let _disk = disk.lock();
    let snapshot: Vec<Item> = items.read().values().cloned().collect();
    let bytes = codec.encode(&snapshot)?;
    atomic_write(path, &bytes)?;
    debug!(path = %path.display(), items = snapshot.len(), "wrote snapshot");
    Ok(())
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and opens a [`MemoryStore`].
///
/// ```rust,no_run
/// use item_store::MemoryStore;
///
/// let store = MemoryStore::builder()
///     .persist_path("items.json")
///     .pretty(false)
///     .build()
///     .unwrap();
/// ```
pub struct MemoryStoreBuilder {
    path: Option<PathBuf>,
    auto_save: bool,
    pretty: bool,
}

impl MemoryStoreBuilder {
    fn new() -> Self {
        Self {
            path: None,
            auto_save: true,
            pretty: true,
        }
    }

    /// Snapshot file to load at startup and write to on auto-save.
    pub fn persist_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Write a snapshot in the background after every mutation (default:
    /// `true`). Has no effect without a persist path.
    pub fn auto_save(mut self, yes: bool) -> Self {
        self.auto_save = yes;
        self
    }

    /// Write indented JSON (default: `true`).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Load the prior snapshot if there is one and return the store.
    ///
    /// A missing snapshot file is fine and gives an empty store; a file that
    /// exists but can't be read or decoded fails the build.
    pub fn build(self) -> Result<MemoryStore> {
        let mut store = MemoryStore::new();
        store.codec = if self.pretty {
            JsonCodec::pretty()
        } else {
            JsonCodec::compact()
        };

        let Some(path) = self.path else {
            return Ok(store);
        };

        if path.try_exists()? {
            store.load_snapshot(&path)?;
        } else {
            info!(path = %path.display(), "no snapshot yet, starting empty");
        }

        if self.auto_save {
            let items = Arc::clone(&store.items);
            let disk = Arc::clone(&store.disk);
            let codec = store.codec.clone();
            let target = path.clone();
            let worker = PersistWorker::start(move || {
                if let Err(e) = write_snapshot(&items, &disk, &target, &codec) {
                    warn!(path = %target.display(), error = %e, "auto-save failed");
                }
            })?;
            store.worker = Some(worker);
        }

        store.path = Some(path);
        Ok(store)
    }
}

impl std::fmt::Debug for MemoryStoreBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryStoreBuilder")
            .field("path", &self.path)
            .field("auto_save", &self.auto_save)
            .field("pretty", &self.pretty)
            .finish()
    }
}
