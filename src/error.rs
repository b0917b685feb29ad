use std::path::PathBuf;

pub type KvResult<T> = Result<T, KvError>;
pub type CodecResult<T> = Result<T, CodecError>;

/// Every failure surfaced by a [`KvStore`](crate::databases::sled_store::KvStore)
/// or [`KvCursor`](crate::databases::sled_store::KvCursor).
///
/// `NotFound` is kept apart from `Engine` so callers can treat a miss
/// differently from a failing store.
#[derive(Debug, thiserror::Error)]
pub enum KvError {
    #[error("There was an error with the storage engine")]
    Engine(#[from] EngineError),
    #[error("Key not found")]
    NotFound,
    #[error("There was a conversion error")]
    Codec(#[from] CodecError),
    #[error("Invalid use of store: {0}")]
    Usage(#[from] UsageError),
}

impl KvError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, KvError::NotFound)
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, KvError::Usage(_))
    }
}

impl From<sled::Error> for KvError {
    fn from(err: sled::Error) -> Self {
        KvError::Engine(EngineError::Sled(err))
    }
}

/// Failures reported by sled or by the filesystem underneath it.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Sled database error: {0}")]
    Sled(#[from] sled::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Database already exists at {0}")]
    AlreadyExists(PathBuf),
    #[error("Database does not exist at {0} and create_if_missing is disabled")]
    Missing(PathBuf),
    #[error("Database at {0} is held open by another handle")]
    Locked(PathBuf),
    #[error("Blocking engine task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("There was an error encoding type")]
    Encoding(#[from] bincode::error::EncodeError),
    #[error("There was an error decoding type")]
    Decoding(#[from] bincode::error::DecodeError),
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("{0}")]
    Custom(String),
}

impl CodecError {
    pub fn custom(msg: impl Into<String>) -> Self {
        CodecError::Custom(msg.into())
    }
}

/// Lifecycle preconditions violated by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("store has not been opened")]
    NotOpen,
    #[error("store is already open")]
    AlreadyOpen,
    #[error("store has been closed")]
    Closed,
    #[error("cursor has already been ended")]
    CursorEnded,
    #[error("cursor lost its position when a pending next() was dropped; seek to resume")]
    CursorInterrupted,
}
