//! Unified error type for all store operations.

/// Things that can go wrong when using the store.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A keyed operation was given an empty identifier.
    InvalidId,
    /// No item with this identifier exists.
    NotFound(String),
    /// Create collided with an item that already has this identifier.
    AlreadyExists(String),
    /// File system problem (read, write, rename).
    Io(String),
    /// Failed to encode the items to bytes.
    Serialize(String),
    /// Snapshot bytes could not be decoded back into items.
    Decode(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidId => write!(f, "invalid item ID"),
            Error::NotFound(id) => write!(f, "item not found: {id}"),
            Error::AlreadyExists(id) => write!(f, "item with ID {id} already exists"),
            Error::Io(msg) => write!(f, "i/o error: {msg}"),
            Error::Serialize(msg) => write!(f, "serialization error: {msg}"),
            Error::Decode(msg) => write!(f, "snapshot decode error: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            Error::Io(err.to_string())
        } else if err.is_syntax() || err.is_eof() || err.is_data() {
            Error::Decode(err.to_string())
        } else {
            Error::Serialize(err.to_string())
        }
    }
}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
