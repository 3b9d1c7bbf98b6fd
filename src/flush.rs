//! Background persistence worker used for auto-save.

use std::sync::mpsc;
use std::thread;

/// Background thread that runs a flush closure whenever it is poked.
///
/// Pokes coalesce: the channel holds at most one pending request, so a burst
/// of mutations while a write is in flight produces a single follow-up write.
/// Each write reads the map at the time it runs, which means the last write
/// always reflects the latest state that existed before it started.
///
/// Dropping the worker closes the channel; a pending poke is still served
/// before the thread exits, and the drop joins the thread.
///
/// The thread logs through the tracing dispatcher that was current when the
/// worker was started.
pub struct PersistWorker {
    tx: Option<mpsc::SyncSender<()>>,
    join_handle: Option<thread::JoinHandle<()>>,
}

impl PersistWorker {
    /// Spawn the worker thread around `flush_fn`.
    pub fn start<F>(flush_fn: F) -> std::io::Result<Self>
    where
        F: Fn() + Send + 'static,
    {
        let (tx, rx) = mpsc::sync_channel::<()>(1);
        let dispatch = tracing::dispatcher::get_default(|d| d.clone());

        let join_handle = thread::Builder::new()
            .name("item-store-persist".into())
            .spawn(move || {
                tracing::dispatcher::with_default(&dispatch, || {
                    while rx.recv().is_ok() {
                        flush_fn();
                    }
                })
            })?;

        Ok(Self {
            tx: Some(tx),
            join_handle: Some(join_handle),
        })
    }

    /// Non-blocking request for a write. If one is already queued this is a
    /// no-op, since the queued write will pick up the current state anyway.
    pub fn trigger(&self) {
        if let Some(ref t) = self.tx {
            let _ = t.try_send(());
        }
    }
}

impl Drop for PersistWorker {
    fn drop(&mut self) {
        drop(self.tx.take());
        if let Some(h) = self.join_handle.take() {
            let _ = h.join();
        }
    }
}

impl std::fmt::Debug for PersistWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistWorker")
            .field("running", &self.join_handle.is_some())
            .finish()
    }
}
