//! The record type held by the store and sent over the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single stored record.
///
/// `id` is the primary key and never changes once the item exists.
/// `created_at` is stamped once; `updated_at` moves on every write.
///
/// Only `id` is required when decoding; other missing fields take their
/// default (empty strings, the Unix epoch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Primary key. Must be non-empty.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// When the item was first created.
    #[serde(default)]
    pub created_at: DateTime<Utc>,
    /// When the item was last written.
    #[serde(default)]
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Build a fresh item with both timestamps set to now.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Full replacement for this item: same `id` and `created_at`, new
    /// content, `updated_at` bumped to now.
    ///
    /// The clock is clamped so `updated_at` never goes backwards.
    #[must_use]
    pub fn revised(&self, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: self.id.clone(),
            name: name.into(),
            description: description.into(),
            created_at: self.created_at,
            updated_at: Utc::now().max(self.updated_at),
        }
    }
}

/// Request body for create and update calls.
///
/// Every field is optional in JSON. A missing `id` becomes an empty string and
/// is rejected by the store as an invalid identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ItemInput {
    /// Identifier for create. Ignored on update, where the path wins.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: String,
}

impl ItemInput {
    /// Turn the payload into a brand-new item.
    pub fn into_item(self) -> Item {
        Item::new(self.id, self.name, self.description)
    }
}
