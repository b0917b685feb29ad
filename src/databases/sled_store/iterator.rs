use super::engine;
use super::store::KvStore;
use crate::config::CursorOptions;
use crate::error::{KvResult, UsageError};
use crate::traits::codec::Codec;
use log::trace;
use std::fmt;

/// One decoded pair produced by a [`KvCursor`].
///
/// `value` is `None` when the engine handed back no value content, which is
/// always the case for keys-only cursors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry<K, V> {
    pub key: K,
    pub value: Option<V>,
}

enum Position {
    Active(sled::Iter),
    Exhausted,
    /// A `next` future was dropped while the engine held the iterator.
    Interrupted,
    Ended,
}

/// Ordered traversal of a store's key space, decoding entries as it goes.
///
/// Entries come back in sled's byte-wise key order (descending for reverse
/// cursors). A cursor must be released with [`end`](Self::end); afterwards
/// every call fails with [`UsageError::CursorEnded`].
///
/// The cursor borrows its store, so the store cannot be closed while any
/// cursor over it is still alive.
pub struct KvCursor<'store, KC, VC>
where
    KC: Codec,
    VC: Codec,
{
    store: &'store KvStore<KC, VC>,
    position: Position,
    options: CursorOptions,
    remaining: Option<usize>,
}

impl<'store, KC, VC> KvCursor<'store, KC, VC>
where
    KC: Codec,
    VC: Codec,
{
    pub(crate) fn new(
        store: &'store KvStore<KC, VC>,
        iter: sled::Iter,
        options: CursorOptions,
    ) -> Self {
        Self {
            store,
            position: Position::Active(iter),
            remaining: options.limit,
            options,
        }
    }

    pub fn options(&self) -> &CursorOptions {
        &self.options
    }

    pub fn is_ended(&self) -> bool {
        matches!(self.position, Position::Ended)
    }

    /// True after a pending [`next`](Self::next) was dropped. Only
    /// [`seek`](Self::seek) or [`end`](Self::end) are accepted from here.
    pub fn is_interrupted(&self) -> bool {
        matches!(self.position, Position::Interrupted)
    }

    /// Position the cursor at the first key `>= key` (the last key `<= key`
    /// for reverse cursors).
    ///
    /// sled positions lazily, so engine failures show up on the next call to
    /// [`next`](Self::next). The entry limit starts counting again from here.
    pub fn seek(&mut self, key: &KC::Item) -> KvResult<()> {
        if self.is_ended() {
            return Err(UsageError::CursorEnded.into());
        }
        let key_bytes = self.store.codecs().key.encode(key)?;
        let db = self.store.db()?;

        let iter = if self.options.reverse {
            db.range(..=key_bytes)
        } else {
            db.range(key_bytes..)
        };
        self.position = Position::Active(iter);
        self.remaining = self.options.limit;
        Ok(())
    }

    /// The next entry, or `None` once the cursor is exhausted.
    ///
    /// Dropping the returned future before it completes loses the engine
    /// iterator; later calls fail with [`UsageError::CursorInterrupted`] until
    /// `seek` re-arms the cursor.
    pub async fn next(&mut self) -> KvResult<Option<Entry<KC::Item, VC::Item>>> {
        let iter = match std::mem::replace(&mut self.position, Position::Interrupted) {
            Position::Active(iter) => iter,
            Position::Exhausted => {
                self.position = Position::Exhausted;
                return Ok(None);
            }
            Position::Interrupted => return Err(UsageError::CursorInterrupted.into()),
            Position::Ended => {
                self.position = Position::Ended;
                return Err(UsageError::CursorEnded.into());
            }
        };
        if self.remaining == Some(0) {
            self.position = Position::Active(iter);
            return Ok(None);
        }

        let reverse = self.options.reverse;
        let advanced = engine::blocking(move || Ok(engine::advance(iter, reverse))).await;
        let (iter, step) = match advanced {
            Ok(advanced) => advanced,
            Err(e) => {
                self.position = Position::Exhausted;
                return Err(e);
            }
        };

        let (key_bytes, value_bytes) = match step {
            Some(Ok(pair)) => {
                self.position = Position::Active(iter);
                pair
            }
            Some(Err(e)) => {
                self.position = Position::Active(iter);
                return Err(e.into());
            }
            None => {
                self.position = Position::Exhausted;
                return Ok(None);
            }
        };

        if let Some(remaining) = self.remaining.as_mut() {
            *remaining -= 1;
        }

        let codecs = self.store.codecs();
        let key = codecs.key.decode(&key_bytes)?;
        let value = if self.options.keys_only {
            None
        } else {
            Some(codecs.value.decode(&value_bytes)?)
        };
        Ok(Some(Entry { key, value }))
    }

    /// Release the engine iterator. Call exactly once, including after `next`
    /// has failed.
    pub async fn end(&mut self) -> KvResult<()> {
        match std::mem::replace(&mut self.position, Position::Ended) {
            Position::Ended => Err(UsageError::CursorEnded.into()),
            Position::Active(iter) => {
                drop(iter);
                trace!("cursor on {} ended", self.store.location().display());
                Ok(())
            }
            Position::Exhausted | Position::Interrupted => {
                trace!("cursor on {} ended", self.store.location().display());
                Ok(())
            }
        }
    }
}

impl<KC, VC> fmt::Debug for KvCursor<'_, KC, VC>
where
    KC: Codec,
    VC: Codec,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = match self.position {
            Position::Active(_) => "active",
            Position::Exhausted => "exhausted",
            Position::Interrupted => "interrupted",
            Position::Ended => "ended",
        };
        f.debug_struct("KvCursor")
            .field("location", &self.store.location())
            .field("position", &position)
            .field("options", &self.options)
            .field("remaining", &self.remaining)
            .finish()
    }
}
