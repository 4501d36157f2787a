//! Configuration for report discovery and scanning.
//!
//! [`ScanConfig`] is a plain serde struct with builder methods, usable from
//! library code without any CLI framework. The `rmfpack` binary builds one
//! from its flags; embedding applications can also load it from TOML.
//!
//! # Example
//!
//! ```rust
//! use rmfpack::config::ScanConfig;
//!
//! let config = ScanConfig::new()
//!     .with_pattern("RMFW*.rpt")
//!     .with_parallel(false);
//!
//! assert_eq!(config.pattern, "RMFW*.rpt");
//! ```
//!
//! ## From TOML
//!
//! ```rust
//! use rmfpack::config::ScanConfig;
//!
//! let config = ScanConfig::from_toml_str("strict_utf8 = true")?;
//! assert!(config.strict_utf8);
//! assert_eq!(config.pattern, "RMFW*.txt");
//! # Ok::<(), rmfpack::RmfError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, RmfError};

/// Default glob used to find reports inside a directory.
pub const DEFAULT_PATTERN: &str = "RMFW*.txt";

/// Settings for [`Aggregator`](crate::core::aggregate::Aggregator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Glob matched against file names when scanning a directory
    /// (default: `RMFW*.txt`)
    pub pattern: String,

    /// Scan files as independent parallel tasks (default: true).
    /// Has no effect without the `parallel` feature.
    pub parallel: bool,

    /// Treat invalid UTF-8 as a per-file failure instead of replacing the
    /// offending bytes (default: false)
    pub strict_utf8: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pattern: DEFAULT_PATTERN.to_string(),
            parallel: true,
            strict_utf8: false,
        }
    }
}

impl ScanConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).map_err(|e| RmfError::invalid_format("config", e.to_string()))
    }

    /// Sets the directory glob pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    /// Enables or disables parallel scanning.
    #[must_use]
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Sets whether invalid UTF-8 fails the file.
    #[must_use]
    pub fn with_strict_utf8(mut self, strict: bool) -> Self {
        self.strict_utf8 = strict;
        self
    }
}
