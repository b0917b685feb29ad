//! # Netabase KV
//!
//! A typed, async facade over the sled embedded ordered key-value store.
//!
//! ## Features
//!
//! - **Typed**: keys and values go through caller-chosen codecs
//! - **Ordered**: cursors walk sled's byte-wise key order with seek and next
//! - **Async**: every engine call runs on tokio's blocking pool
//! - **Explicit lifecycle**: open, close and destroy are separate, checked steps
//!
//! ## Quick Start
//!
//! ```rust
//! use netabase_kv::prelude::*;
//!
//! #[derive(Debug, Clone, PartialEq, bincode::Encode, bincode::Decode)]
//! struct Profile {
//!     name: String,
//!     age: u32,
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> KvResult<()> {
//! # let dir = tempfile::tempdir().unwrap();
//! let mut store = KvStore::new(
//!     dir.path().join("profiles"),
//!     Codecs::new(Utf8Codec, BincodeCodec::<Profile>::new()),
//! );
//! store.open().await?;
//!
//! let ada = Profile { name: "Ada".into(), age: 36 };
//! store.put(&"ada".to_string(), &ada).await?;
//! assert_eq!(store.get(&"ada".to_string()).await?, ada);
//! assert!(store.get(&"bob".to_string()).await.unwrap_err().is_not_found());
//!
//! store.close().await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod databases;
pub mod error;
pub mod prelude;
pub mod traits;
