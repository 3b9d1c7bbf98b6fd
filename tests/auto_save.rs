use item_store::{Item, ItemStore, MemoryStore, StoreConfig};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "item_store_autosave_{}_{}.json",
        name,
        std::process::id()
    ))
}

fn open(path: &Path) -> MemoryStore {
    MemoryStore::builder().persist_path(path).build().unwrap()
}

#[test]
fn auto_save_reaches_disk_by_drop() {
    let path = temp_path("reaches_disk");
    let _ = std::fs::remove_file(&path);
    {
        let store = open(&path);
        assert!(store.auto_save());
        store.create(Item::new("a", "Anvil", "")).unwrap();
        store.create(Item::new("b", "Bolt", "")).unwrap();
        store.update(Item::new("a", "Anvil2", "")).unwrap();
        store.delete("b").unwrap();
    }

    let reloaded = open(&path);
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.get("a").unwrap().name, "Anvil2");
    drop(reloaded);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn burst_of_writes_converges_to_latest_state() {
    let path = temp_path("burst");
    let _ = std::fs::remove_file(&path);
    {
        let store = open(&path);
        for i in 0..200 {
            store.create(Item::new(format!("k{i}"), "x", "")).unwrap();
        }
        for i in 0..100 {
            store.delete(&format!("k{i}")).unwrap();
        }
    }

    let reloaded = open(&path);
    assert_eq!(reloaded.len(), 100);
    assert!(reloaded.get("k0").is_err());
    assert!(reloaded.get("k199").is_ok());
    drop(reloaded);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn auto_save_off_writes_nothing() {
    let path = temp_path("off");
    let _ = std::fs::remove_file(&path);
    {
        let store = MemoryStore::builder()
            .persist_path(&path)
            .auto_save(false)
            .build()
            .unwrap();
        assert!(!store.auto_save());
        store.create(Item::new("a", "Anvil", "")).unwrap();
    }
    assert!(!path.exists());
}

#[test]
fn manual_save_with_auto_save_off() {
    let path = temp_path("manual");
    let _ = std::fs::remove_file(&path);
    {
        let store = MemoryStore::from_config(&StoreConfig {
            persist_path: path.to_string_lossy().into_owned(),
            auto_save: false,
        })
        .unwrap();
        store.create(Item::new("a", "Anvil", "")).unwrap();
        let target = store.persist_path().unwrap().to_path_buf();
        store.save_snapshot(&target).unwrap();
    }
    let reloaded = open(&path);
    assert_eq!(reloaded.get("a").unwrap().name, "Anvil");
    drop(reloaded);
    let _ = std::fs::remove_file(&path);
}

#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl LogBuffer {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

#[test]
fn failed_auto_save_does_not_fail_mutation() {
    let path = std::env::temp_dir()
        .join(format!("item_store_autosave_missing_dir_{}", std::process::id()))
        .join("db.json");
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let store = open(&path);

        store.create(Item::new("a", "Anvil", "")).unwrap();
        store.update(Item::new("a", "Anvil2", "")).unwrap();
        assert_eq!(store.get("a").unwrap().name, "Anvil2");
        store.delete("a").unwrap();
        drop(store);
    });

    assert!(!path.exists());
    let output = logs.contents();
    assert!(output.contains("auto-save failed"), "logs were: {output}");
    assert!(output.contains("WARN"), "logs were: {output}");
}

#[test]
fn failed_mutation_does_not_trigger_save() {
    let path = temp_path("failed_mutation");
    let _ = std::fs::remove_file(&path);
    {
        let store = open(&path);
        assert!(store.update(Item::new("ghost", "x", "")).is_err());
        assert!(store.delete("ghost").is_err());
        assert!(store.create(Item::new("", "x", "")).is_err());
    }
    assert!(!path.exists());
}
