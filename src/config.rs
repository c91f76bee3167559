//! Configuration for the export transform.
//!
//! This module provides a clean configuration struct for library usage,
//! without any CLI framework dependencies.
//!
//! # Example
//!
//! ```rust
//! use chatframe::config::TransformConfig;
//! use chatframe::transform::ExportTransformer;
//!
//! let config = TransformConfig::new().with_fix_encoding(true);
//! let transformer = ExportTransformer::with_config(config);
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for transforming a Messenger export.
///
/// The default configuration reproduces every string verbatim. Messenger
/// exports share Meta's Mojibake problem (UTF-8 bytes stored as Latin-1
/// codepoints), so [`with_fix_encoding`](TransformConfig::with_fix_encoding)
/// is available as an opt-in repair.
///
/// # Example
///
/// ```rust
/// use chatframe::config::TransformConfig;
///
/// let config = TransformConfig::new().with_fix_encoding(true);
/// assert!(config.fix_encoding);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Fix Meta's broken UTF-8 encoding (Mojibake) in derived rows
    /// (default: false)
    pub fix_encoding: bool,
}

impl TransformConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables encoding repair.
    ///
    /// The repair touches derived string columns only: sender names,
    /// text bodies, share text, participant names, reaction emoji, and
    /// actor names. Attachment URIs pass through untouched.
    #[must_use]
    pub fn with_fix_encoding(mut self, fix: bool) -> Self {
        self.fix_encoding = fix;
        self
    }
}
