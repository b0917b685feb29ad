//! Blocking sled calls and the bridge that runs them off the async caller.
//!
//! Everything in here is synchronous; the store and cursor wrap each call in
//! [`blocking`] so exactly one future observes its completion.

use crate::config::OpenOptions;
use crate::error::{EngineError, KvResult};
use fs2::FileExt;
use log::{debug, trace};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// File sled keeps its lock on, inside the database directory.
const DB_FILE: &str = "db";
/// Written by sled on first open alongside [`DB_FILE`].
const CONF_FILE: &str = "conf";
const BLOBS_DIR: &str = "blobs";
const SNAPSHOT_PREFIX: &str = "snap.";

/// Runs `f` on tokio's blocking pool and waits for it.
pub(crate) async fn blocking<T, F>(f: F) -> KvResult<T>
where
    F: FnOnce() -> KvResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(EngineError::from)?
}

pub(crate) fn holds_database(location: &Path) -> bool {
    location.join(DB_FILE).exists() || location.join(CONF_FILE).exists()
}

pub(crate) fn open(location: &Path, options: &OpenOptions) -> KvResult<sled::Db> {
    let exists = holds_database(location);
    if !exists && !options.create_if_missing {
        return Err(EngineError::Missing(location.to_path_buf()).into());
    }
    if exists && options.error_if_exists {
        return Err(EngineError::AlreadyExists(location.to_path_buf()).into());
    }

    trace!("opening sled at {} with {:?}", location.display(), options);
    let db = options.to_sled_config(location).open()?;
    debug!(
        "opened store at {} (recovered: {})",
        location.display(),
        db.was_recovered()
    );
    Ok(db)
}

pub(crate) fn close(location: &Path, db: sled::Db) -> KvResult<()> {
    let flushed = db.flush()?;
    drop(db);
    debug!(
        "closed store at {} after flushing {} bytes",
        location.display(),
        flushed
    );
    Ok(())
}

/// Removes the files sled owns at `location`.
///
/// Only sled's own entries (`db`, `conf`, `blobs/`, `snap.*`) are deleted.
/// A location that holds no database is left untouched, and the directory
/// itself is removed only once nothing else is left in it. sled takes an
/// exclusive advisory lock on its `db` file while open, so contention on that
/// lock means some handle still holds the database.
pub(crate) fn destroy(location: &Path) -> KvResult<()> {
    if !location.is_dir() || !holds_database(location) {
        trace!("destroy of {}: no database to remove", location.display());
        return Ok(());
    }

    let db_file = location.join(DB_FILE);
    match fs::OpenOptions::new().read(true).write(true).open(&db_file) {
        Ok(file) => {
            if let Err(e) = file.try_lock_exclusive() {
                if e.kind() == fs2::lock_contended_error().kind() {
                    return Err(EngineError::Locked(location.to_path_buf()).into());
                }
                return Err(EngineError::from(e).into());
            }
            file.unlock().map_err(EngineError::from)?;
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(EngineError::from(e).into()),
    }

    for entry in fs::read_dir(location).map_err(EngineError::from)? {
        let entry = entry.map_err(EngineError::from)?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if !is_engine_entry(name) {
            continue;
        }
        let path = entry.path();
        if entry.file_type().map_err(EngineError::from)?.is_dir() {
            fs::remove_dir_all(&path).map_err(EngineError::from)?;
        } else {
            fs::remove_file(&path).map_err(EngineError::from)?;
        }
    }

    match fs::remove_dir(location) {
        Ok(()) => debug!("destroyed store at {}", location.display()),
        Err(e) if e.kind() == ErrorKind::DirectoryNotEmpty => debug!(
            "destroyed store at {}; kept foreign files in place",
            location.display()
        ),
        Err(e) => return Err(EngineError::from(e).into()),
    }
    Ok(())
}

fn is_engine_entry(name: &str) -> bool {
    name == DB_FILE || name == CONF_FILE || name == BLOBS_DIR || name.starts_with(SNAPSHOT_PREFIX)
}

pub(crate) type RawEntry = (sled::IVec, sled::IVec);

/// Advances `iter` one step and hands it back with the result.
pub(crate) fn advance(
    mut iter: sled::Iter,
    reverse: bool,
) -> (sled::Iter, Option<sled::Result<RawEntry>>) {
    let step = if reverse { iter.next_back() } else { iter.next() };
    (iter, step)
}
