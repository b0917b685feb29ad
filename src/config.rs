//! Configuration for opening stores and creating cursors.
//!
//! Both option sets use the builder pattern via `typed-builder`, and every
//! field has a default so `OpenOptions::default()` is a usable configuration.

use std::path::Path;
use strum::{AsRefStr, Display, EnumString};
use typed_builder::TypedBuilder;

/// Engine tuning profile, forwarded to `sled::Mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Mode {
    /// Favour disk space over write throughput.
    #[default]
    LowSpace,
    /// Favour write throughput over disk space.
    HighThroughput,
}

impl From<Mode> for sled::Mode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::LowSpace => sled::Mode::LowSpace,
            Mode::HighThroughput => sled::Mode::HighThroughput,
        }
    }
}

/// Options applied when a [`KvStore`](crate::databases::sled_store::KvStore)
/// is opened.
///
/// # Examples
///
/// ```
/// use netabase_kv::config::{Mode, OpenOptions};
///
/// let options = OpenOptions::builder()
///     .create_if_missing(false)
///     .cache_capacity_bytes(64 * 1024 * 1024)
///     .mode(Mode::HighThroughput)
///     .build();
///
/// assert!(!options.create_if_missing);
/// assert!(!options.error_if_exists);
/// ```
#[derive(Debug, Clone, TypedBuilder)]
#[builder(doc)]
pub struct OpenOptions {
    /// Create the database if the location does not exist yet
    #[builder(default = true)]
    pub create_if_missing: bool,

    /// Refuse to open a location that already holds a database
    #[builder(default = false)]
    pub error_if_exists: bool,

    /// Size of sled's page cache in bytes
    #[builder(default = 1024 * 1024 * 1024)]
    pub cache_capacity_bytes: u64,

    /// Background flush interval; `None` disables periodic flushing
    #[builder(default = Some(500))]
    pub flush_every_ms: Option<u64>,

    #[builder(default)]
    pub mode: Mode,

    /// Remove the database files when the engine is dropped
    #[builder(default = false)]
    pub temporary: bool,
}

impl Default for OpenOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl OpenOptions {
    pub(crate) fn to_sled_config(&self, location: &Path) -> sled::Config {
        sled::Config::new()
            .path(location)
            .cache_capacity(self.cache_capacity_bytes)
            .flush_every_ms(self.flush_every_ms)
            .mode(self.mode.into())
            .temporary(self.temporary)
    }
}

/// Options for a [`KvCursor`](crate::databases::sled_store::KvCursor).
///
/// ```
/// use netabase_kv::config::CursorOptions;
///
/// let options = CursorOptions::builder().reverse(true).limit(10).build();
/// assert_eq!(options.limit, Some(10));
/// ```
#[derive(Debug, Clone, Default, TypedBuilder)]
#[builder(doc)]
pub struct CursorOptions {
    /// Walk the key space from the largest key down
    #[builder(default = false)]
    pub reverse: bool,

    /// Skip reading and decoding values; entries carry `value: None`
    #[builder(default = false)]
    pub keys_only: bool,

    /// Stop after this many entries (counted again from every seek)
    #[builder(default, setter(strip_option))]
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_open_options_defaults() {
        let options = OpenOptions::default();
        assert!(options.create_if_missing);
        assert!(!options.error_if_exists);
        assert_eq!(options.cache_capacity_bytes, 1024 * 1024 * 1024);
        assert_eq!(options.flush_every_ms, Some(500));
        assert_eq!(options.mode, Mode::LowSpace);
        assert!(!options.temporary);
    }

    #[test]
    fn test_open_options_builder() {
        let options = OpenOptions::builder()
            .error_if_exists(true)
            .flush_every_ms(None)
            .temporary(true)
            .build();

        assert!(options.error_if_exists);
        assert_eq!(options.flush_every_ms, None);
        assert!(options.temporary);
        // sled::Config has no getters; building it must simply not panic
        let _ = options.to_sled_config(&PathBuf::from("/tmp/netabase_kv_config"));
    }

    #[test]
    fn test_mode_parses_from_str() {
        assert_eq!("high_throughput".parse::<Mode>().unwrap(), Mode::HighThroughput);
        assert_eq!(Mode::LowSpace.as_ref(), "low_space");
    }

    #[test]
    fn test_cursor_options_default() {
        let options = CursorOptions::default();
        assert!(!options.reverse);
        assert!(!options.keys_only);
        assert_eq!(options.limit, None);
    }
}
