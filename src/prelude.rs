//! Common imports for working with typed stores.
//!
//! ```rust
//! use netabase_kv::prelude::*;
//! ```

pub use crate::config::{CursorOptions, Mode, OpenOptions};
pub use crate::databases::sled_store::{Entry, KvBatch, KvCursor, KvStore, destroy};
pub use crate::error::{CodecError, CodecResult, EngineError, KvError, KvResult, UsageError};
pub use crate::traits::codec::{
    BincodeCodec, Codec, Codecs, FnCodec, RawCodec, SerdeCodec, Utf8Codec,
};
