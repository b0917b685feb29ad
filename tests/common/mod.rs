// Common test utilities and helpers
#![allow(dead_code)]

use netabase_kv::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

pub type StringStore = KvStore<Utf8Codec, Utf8Codec>;
pub type RawStore = KvStore<RawCodec, RawCodec>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Fresh location inside a temp dir; the location itself does not exist yet.
pub fn test_location(name: &str) -> (TempDir, PathBuf) {
    init_logging();
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let location = dir.path().join(name);
    (dir, location)
}

pub fn string_store(location: &PathBuf) -> StringStore {
    KvStore::new(location, Codecs::new(Utf8Codec, Utf8Codec))
}

/// Open a string store at a fresh location. Bind the `TempDir` first so it
/// outlives the store.
pub async fn create_test_db(name: &str) -> KvResult<(TempDir, StringStore, PathBuf)> {
    let (dir, location) = test_location(name);
    let mut store = string_store(&location);
    store.open().await?;
    Ok((dir, store, location))
}

pub async fn put_all(store: &StringStore, pairs: &[(&str, &str)]) -> KvResult<()> {
    for (key, value) in pairs {
        store.put(&key.to_string(), &value.to_string()).await?;
    }
    Ok(())
}

/// Drain a cursor into `(key, value)` pairs and end it.
pub async fn collect_cursor(
    mut cursor: KvCursor<'_, Utf8Codec, Utf8Codec>,
) -> KvResult<Vec<(String, Option<String>)>> {
    let mut entries = Vec::new();
    while let Some(entry) = cursor.next().await? {
        entries.push((entry.key, entry.value));
    }
    cursor.end().await?;
    Ok(entries)
}

pub fn pairs(expected: &[(&str, &str)]) -> Vec<(String, Option<String>)> {
    expected
        .iter()
        .map(|(k, v)| (k.to_string(), Some(v.to_string())))
        .collect()
}
