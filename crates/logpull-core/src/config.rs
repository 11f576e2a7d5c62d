//! Configuration for extraction and remote fetching.

use std::time::Duration;

/// Extraction settings.
///
/// # Examples
///
/// ```
/// use logpull_core::ExtractConfig;
///
/// // Keep the archive, restore stored permissions
/// let config = ExtractConfig::default();
///
/// // Remove the archive once it has been unpacked
/// let consuming = ExtractConfig {
///     delete_source: true,
///     ..Default::default()
/// };
/// assert!(consuming.preserve_permissions);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Remove the source archive once extraction has run.
    pub delete_source: bool,

    /// Apply the POSIX mode stored in each entry's external attributes.
    pub preserve_permissions: bool,

    /// Maximum number of normal components in an entry path.
    pub max_path_depth: usize,
}

impl Default for ExtractConfig {
    /// Default values:
    /// - `delete_source`: false
    /// - `preserve_permissions`: true
    /// - `max_path_depth`: 32
    fn default() -> Self {
        Self {
            delete_source: false,
            preserve_permissions: true,
            max_path_depth: 32,
        }
    }
}

impl ExtractConfig {
    /// Returns a copy of this configuration with `delete_source` set.
    #[must_use]
    pub fn with_delete_source(mut self, delete_source: bool) -> Self {
        self.delete_source = delete_source;
        self
    }
}

/// Default connect/read timeout for remote requests.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Remote log server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteConfig {
    /// Base URL of the log server; device ids are appended to it.
    pub base_url: String,

    /// Connect and read timeout applied to every request.
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Creates a configuration for `base_url` with the default timeout.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
