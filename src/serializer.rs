//! Snapshot encoding. Defaults to indented JSON via serde_json.
//!
//! Implement [`SnapshotCodec`] if you need a different on-disk format.

use crate::error::{Error, Result};
use crate::item::Item;

/// Converts a full item set to and from bytes for persistence.
pub trait SnapshotCodec: Send + Sync {
    /// Encode items to bytes.
    fn encode(&self, items: &[Item]) -> Result<Vec<u8>>;

    /// Decode bytes back into items. Blank input decodes to an empty list.
    fn decode(&self, bytes: &[u8]) -> Result<Vec<Item>>;
}

/// JSON array codec with optional pretty-printing.
#[derive(Debug, Clone)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    /// Compact JSON (single line, no extra whitespace).
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    /// Indented JSON, easier to read and diff by hand.
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::pretty()
    }
}

impl SnapshotCodec for JsonCodec {
    fn encode(&self, items: &[Item]) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(items)
        } else {
            serde_json::to_vec(items)
        };
        bytes.map_err(|e| Error::Serialize(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Item>> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        // A bare `null` document is an empty snapshot.
        let items: Option<Vec<Item>> = serde_json::from_slice(bytes)?;
        let items = items.unwrap_or_default();
        if items.iter().any(|item| item.id.is_empty()) {
            return Err(Error::Decode("snapshot contains an item with an empty id".into()));
        }
        Ok(items)
    }
}
