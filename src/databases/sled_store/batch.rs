use super::engine;
use super::store::KvStore;
use crate::error::KvResult;
use crate::traits::codec::Codec;
use std::fmt;

/// Batch builder for a [`KvStore`].
///
/// Keys and values are encoded as they are added, so codec failures surface
/// before anything touches the engine. [`write`](Self::write) applies every
/// operation atomically: readers see all of them or none.
pub struct KvBatch<'store, KC, VC>
where
    KC: Codec,
    VC: Codec,
{
    store: &'store KvStore<KC, VC>,
    batch: sled::Batch,
    len: usize,
}

impl<'store, KC, VC> KvBatch<'store, KC, VC>
where
    KC: Codec,
    VC: Codec,
{
    pub(crate) fn new(store: &'store KvStore<KC, VC>) -> Self {
        Self {
            store,
            batch: sled::Batch::default(),
            len: 0,
        }
    }

    pub fn put(&mut self, key: &KC::Item, value: &VC::Item) -> KvResult<&mut Self> {
        let codecs = self.store.codecs();
        let key_bytes = codecs.key.encode(key)?;
        let value_bytes = codecs.value.encode(value)?;
        self.batch.insert(key_bytes, value_bytes);
        self.len += 1;
        Ok(self)
    }

    pub fn del(&mut self, key: &KC::Item) -> KvResult<&mut Self> {
        let key_bytes = self.store.codecs().key.encode(key)?;
        self.batch.remove(key_bytes);
        self.len += 1;
        Ok(self)
    }

    /// Number of operations queued, counting repeats of the same key.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub async fn write(self) -> KvResult<()> {
        let db = self.store.db()?.clone();
        let batch = self.batch;
        engine::blocking(move || {
            db.apply_batch(batch)?;
            Ok(())
        })
        .await
    }
}

impl<KC, VC> fmt::Debug for KvBatch<'_, KC, VC>
where
    KC: Codec,
    VC: Codec,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KvBatch")
            .field("location", &self.store.location())
            .field("len", &self.len)
            .finish()
    }
}
