//! Store and server configuration.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Persistence settings for a [`MemoryStore`](crate::MemoryStore).
///
/// ```rust
/// use item_store::StoreConfig;
///
/// let cfg: StoreConfig = serde_json::from_str(r#"{"persistPath":"db.json"}"#).unwrap();
/// assert!(cfg.auto_save);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreConfig {
    /// Snapshot file. Empty disables persistence.
    pub persist_path: String,
    /// Write a snapshot after every successful mutation.
    pub auto_save: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            persist_path: String::new(),
            auto_save: true,
        }
    }
}

impl StoreConfig {
    /// The snapshot path, or `None` when persistence is off.
    pub fn path(&self) -> Option<&Path> {
        if self.persist_path.is_empty() {
            None
        } else {
            Some(Path::new(&self.persist_path))
        }
    }
}

/// Command-line flags for the server binary.
#[derive(Debug, Clone, Parser)]
#[command(name = "item-store")]
#[command(about = "CRUD HTTP service over an in-memory item store")]
pub struct Args {
    /// Enable database persistence
    #[arg(long)]
    pub persist: bool,

    /// Path to the database file
    #[arg(long, default_value = "database.json")]
    pub dbpath: PathBuf,

    /// Automatically save changes to file
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub autosave: bool,

    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to run the server on
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
}

impl Args {
    /// Store settings implied by the flags.
    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            persist_path: if self.persist {
                self.dbpath.to_string_lossy().into_owned()
            } else {
                String::new()
            },
            auto_save: self.autosave,
        }
    }

    /// Socket address to listen on.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}
