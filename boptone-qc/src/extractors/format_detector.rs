//! Format detection from the declared filename
//!
//! Maps the lower-cased extension to a known container/codec family via the
//! configured format table. Unknown or missing extensions are rejected before any
//! other check runs.

use crate::config::ValidationConfig;
use crate::types::FormatInfo;
use std::path::Path;

/// Outcome of format detection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatDetection {
    Supported(FormatInfo),
    /// Extension not in the table, or no extension at all
    Unsupported { extension: Option<String> },
}

/// Lower-cased extension of `filename`, without the dot
///
/// Returns None for names without an extension (including a trailing dot).
pub fn file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty())
        .map(|e| e.to_lowercase())
}

/// Format detector backed by the configured format table
pub struct FormatDetector<'a> {
    config: &'a ValidationConfig,
}

impl<'a> FormatDetector<'a> {
    pub fn new(config: &'a ValidationConfig) -> Self {
        Self { config }
    }

    pub fn detect(&self, filename: &str) -> FormatDetection {
        match file_extension(filename) {
            Some(ext) => match self.config.lookup_format(&ext) {
                Some(info) => FormatDetection::Supported(info),
                None => FormatDetection::Unsupported {
                    extension: Some(ext),
                },
            },
            None => FormatDetection::Unsupported { extension: None },
        }
    }
}
