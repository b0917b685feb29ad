//! Typed, async wrapper around the [sled](https://docs.rs/sled) embedded database.
//!
//! Keys and values pass through caller-chosen [`Codec`](crate::traits::codec::Codec)s
//! on their way to and from sled's byte-string key space, and each engine
//! call runs on tokio's blocking pool.
//!
//! # Module Organization
//!
//! - `engine.rs` - Blocking sled calls and the async bridge
//! - `store.rs` - Store handle lifecycle and single-key operations (KvStore)
//! - `iterator.rs` - Ordered cursor (KvCursor)
//! - `batch.rs` - Atomic multi-key writes (KvBatch)
//!
//! # Examples
//!
//! ```rust
//! use netabase_kv::databases::sled_store::{KvStore, destroy};
//! use netabase_kv::traits::codec::{Codecs, Utf8Codec};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//! let location = dir.path().join("people");
//!
//! let mut store = KvStore::new(&location, Codecs::new(Utf8Codec, Utf8Codec));
//! store.open().await?;
//!
//! store.put(&"ada".to_string(), &"lovelace".to_string()).await?;
//! assert_eq!(store.get(&"ada".to_string()).await?, "lovelace");
//!
//! let mut cursor = store.iterator()?;
//! while let Some(entry) = cursor.next().await? {
//!     println!("{} => {:?}", entry.key, entry.value);
//! }
//! cursor.end().await?;
//!
//! store.close().await?;
//! destroy(&location).await?;
//! # Ok(())
//! # }
//! ```

pub mod batch;
mod engine;
pub mod iterator;
pub mod store;

pub use batch::KvBatch;
pub use iterator::{Entry, KvCursor};
pub use store::{KvStore, destroy};
