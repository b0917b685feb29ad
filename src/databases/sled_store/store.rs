use super::batch::KvBatch;
use super::engine;
use super::iterator::KvCursor;
use crate::config::{CursorOptions, OpenOptions};
use crate::error::{KvError, KvResult, UsageError};
use crate::traits::codec::{Codec, Codecs};
use log::{debug, trace};
use std::fmt;
use std::path::{Path, PathBuf};

enum StoreState {
    Unopened,
    Open(sled::Db),
    Closed,
}

/// Typed handle on one sled database bound to a filesystem location.
///
/// Keys and values are converted through the store's [`Codecs`] before they
/// reach sled, and every engine call runs on tokio's blocking pool.
///
/// A handle starts unopened; `get`, `put` and friends fail with
/// [`UsageError::NotOpen`] until [`open`](Self::open) succeeds and with
/// [`UsageError::Closed`] after [`close`](Self::close).
pub struct KvStore<KC, VC>
where
    KC: Codec,
    VC: Codec,
{
    location: PathBuf,
    codecs: Codecs<KC, VC>,
    state: StoreState,
}

impl<KC, VC> KvStore<KC, VC>
where
    KC: Codec,
    VC: Codec,
{
    /// Bind a handle to `location`. Nothing is read or written until `open`.
    pub fn new<P: Into<PathBuf>>(location: P, codecs: Codecs<KC, VC>) -> Self {
        Self {
            location: location.into(),
            codecs,
            state: StoreState::Unopened,
        }
    }

    pub fn location(&self) -> &Path {
        &self.location
    }

    pub fn codecs(&self) -> &Codecs<KC, VC> {
        &self.codecs
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, StoreState::Open(_))
    }

    /// Open with [`OpenOptions::default`].
    pub async fn open(&mut self) -> KvResult<()> {
        self.open_with(OpenOptions::default()).await
    }

    /// Open the engine at the bound location.
    ///
    /// Fails with an engine error when sled refuses (another handle holds the
    /// lock, the files are corrupt) or when `options` rule the location out.
    pub async fn open_with(&mut self, options: OpenOptions) -> KvResult<()> {
        match self.state {
            StoreState::Unopened => {}
            StoreState::Open(_) => return Err(UsageError::AlreadyOpen.into()),
            StoreState::Closed => return Err(UsageError::Closed.into()),
        }

        let location = self.location.clone();
        let db = engine::blocking(move || engine::open(&location, &options)).await?;
        self.state = StoreState::Open(db);
        Ok(())
    }

    /// Flush and release the engine.
    ///
    /// The handle is closed afterwards even when the final flush fails; the
    /// flush error is still returned. Cursors borrow the store, so none can be
    /// alive here.
    pub async fn close(&mut self) -> KvResult<()> {
        let db = match std::mem::replace(&mut self.state, StoreState::Closed) {
            StoreState::Open(db) => db,
            StoreState::Unopened => {
                self.state = StoreState::Unopened;
                return Err(UsageError::NotOpen.into());
            }
            StoreState::Closed => return Err(UsageError::Closed.into()),
        };

        let location = self.location.clone();
        engine::blocking(move || engine::close(&location, db)).await
    }

    pub(crate) fn db(&self) -> KvResult<&sled::Db> {
        match &self.state {
            StoreState::Open(db) => Ok(db),
            StoreState::Unopened => Err(UsageError::NotOpen.into()),
            StoreState::Closed => Err(UsageError::Closed.into()),
        }
    }

    /// Read the value stored under `key`.
    ///
    /// A missing key is [`KvError::NotFound`], never an engine error.
    pub async fn get(&self, key: &KC::Item) -> KvResult<VC::Item> {
        let db = self.db()?.clone();
        let key_bytes = self.codecs.key.encode(key)?;

        match engine::blocking(move || Ok(db.get(key_bytes)?)).await? {
            Some(ivec) => Ok(self.codecs.value.decode(&ivec)?),
            None => Err(KvError::NotFound),
        }
    }

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// Durability is sled's: the write reaches disk on the next flush.
    pub async fn put(&self, key: &KC::Item, value: &VC::Item) -> KvResult<()> {
        let db = self.db()?.clone();
        let key_bytes = self.codecs.key.encode(key)?;
        let value_bytes = self.codecs.value.encode(value)?;

        engine::blocking(move || {
            db.insert(key_bytes, value_bytes)?;
            Ok(())
        })
        .await
    }

    /// Remove `key`. Removing an absent key is not an error.
    pub async fn del(&self, key: &KC::Item) -> KvResult<()> {
        let db = self.db()?.clone();
        let key_bytes = self.codecs.key.encode(key)?;

        engine::blocking(move || {
            db.remove(key_bytes)?;
            Ok(())
        })
        .await
    }

    /// Start an atomic group of writes. Nothing is applied until
    /// [`KvBatch::write`].
    pub fn batch(&self) -> KvResult<KvBatch<'_, KC, VC>> {
        self.db()?;
        Ok(KvBatch::new(self))
    }

    /// Force buffered writes to disk, returning the number of bytes flushed.
    pub async fn flush(&self) -> KvResult<usize> {
        let db = self.db()?.clone();
        engine::blocking(move || Ok(db.flush()?)).await
    }

    /// A forward cursor over the whole key space, not yet positioned.
    pub fn iterator(&self) -> KvResult<KvCursor<'_, KC, VC>> {
        self.iterator_with(CursorOptions::default())
    }

    pub fn iterator_with(&self, options: CursorOptions) -> KvResult<KvCursor<'_, KC, VC>> {
        let db = self.db()?;
        trace!("new cursor on {} with {:?}", self.location.display(), options);
        Ok(KvCursor::new(self, db.iter(), options))
    }
}

impl<KC, VC> fmt::Debug for KvStore<KC, VC>
where
    KC: Codec,
    VC: Codec,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            StoreState::Unopened => "unopened",
            StoreState::Open(_) => "open",
            StoreState::Closed => "closed",
        };
        f.debug_struct("KvStore")
            .field("location", &self.location)
            .field("state", &state)
            .finish()
    }
}

/// Erase the files sled keeps at `location`.
///
/// Fails with [`EngineError::Locked`](crate::error::EngineError::Locked) while
/// any handle holds the location open. Only sled's own files are removed:
/// a directory that holds no database is left alone, and foreign files next
/// to a database survive along with their directory. Destroying a location
/// that holds nothing succeeds.
pub async fn destroy<P: AsRef<Path>>(location: P) -> KvResult<()> {
    let location = location.as_ref().to_path_buf();
    debug!("destroying store at {}", location.display());
    engine::blocking(move || engine::destroy(&location)).await
}
