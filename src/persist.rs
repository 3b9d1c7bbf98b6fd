//! Disk I/O helpers: read a snapshot file and atomic write.
//!
//! Snapshots are written whole to a sibling temp file, synced, then renamed
//! over the target, so readers of the snapshot path only ever see a complete
//! file.

use crate::error::{Error, Result};
use crate::item::Item;
use crate::serializer::SnapshotCodec;
use std::io::Write;
use std::path::Path;

/// Reads and decodes the snapshot at `path`.
///
/// A missing file is an [`Error::Io`]; callers that want "start empty" should
/// check for existence first. An empty file decodes to no items.
pub fn load<C: SnapshotCodec + ?Sized>(path: &Path, codec: &C) -> Result<Vec<Item>> {
    let bytes = std::fs::read(path).map_err(|e| Error::Io(format!("{}: {e}", path.display())))?;
    codec.decode(&bytes)
}

/// Write `bytes` to `<path>.tmp`, fsync it, and rename over `path`. A kill
/// or power cut mid-write leaves the previous snapshot in place rather than
/// a truncated one.
pub fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
    let tmp = path.with_extension(format!("{ext}.tmp"));
    write_synced(&tmp, bytes).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        Error::Io(format!("{}: {e}", tmp.display()))
    })?;
    if let Err(e) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(Error::Io(format!("{}: {e}", path.display())));
    }
    Ok(())
}

fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
