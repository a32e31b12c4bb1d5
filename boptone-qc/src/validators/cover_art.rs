//! Cover-art validation
//!
//! Independent of the audio pipeline. Checks the declared format against the
//! allowlist, enforces the size floor and ceiling, and cross-checks the declared
//! extension against the file's magic bytes. Pixel dimensions are not verified; a
//! reminder is added to `info`.

use crate::config::CoverArtLimits;
use crate::extractors::format_detector::file_extension;
use crate::types::{CoverArtValidationResult, ImageFormat};
use tracing::debug;

/// Cover-art validator over the configured limits
pub struct CoverArtValidator {
    limits: CoverArtLimits,
}

impl CoverArtValidator {
    pub fn new(limits: CoverArtLimits) -> Self {
        Self { limits }
    }

    fn allowed_list(&self) -> String {
        self.limits
            .allowed_formats
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(" or ")
    }

    pub fn validate(&self, buffer: &[u8], filename: &str) -> CoverArtValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        let mut info = Vec::new();
        let size = buffer.len() as u64;

        let declared = file_extension(filename)
            .as_deref()
            .and_then(ImageFormat::from_extension);
        let mut format = match declared {
            Some(f) if self.limits.allowed_formats.contains(&f) => Some(f),
            Some(f) => {
                errors.push(format!(
                    "{} cover art is not accepted. Use {}.",
                    f,
                    self.allowed_list()
                ));
                Some(f)
            }
            None => {
                errors.push(format!(
                    "Unrecognised cover art file type. Use {}.",
                    self.allowed_list()
                ));
                None
            }
        };

        if size > self.limits.max_file_size_bytes {
            errors.push(format!(
                "Cover art is {:.1} MB; the maximum is {:.0} MB.",
                size as f64 / (1024.0 * 1024.0),
                self.limits.max_file_size_bytes as f64 / (1024.0 * 1024.0)
            ));
        } else if size < self.limits.min_file_size_bytes {
            errors.push(format!(
                "Cover art is only {} bytes; it is likely empty or too low resolution.",
                size
            ));
        }

        // Content sniffing; unknown bytes are left to the extension check
        if let Some(kind) = infer::get(buffer) {
            match ImageFormat::from_mime(kind.mime_type()) {
                Some(sniffed) if !self.limits.allowed_formats.contains(&sniffed) => {
                    errors.push(format!(
                        "File content is {}, which is not accepted. Use {}.",
                        sniffed,
                        self.allowed_list()
                    ));
                }
                Some(sniffed) if Some(sniffed) != declared => {
                    if declared.is_some() {
                        warnings.push(format!(
                            "File extension does not match its content ({}). Rename the file to match.",
                            sniffed
                        ));
                    }
                    format = Some(sniffed);
                }
                Some(_) => {}
                None => {
                    errors.push(format!(
                        "File content ({}) is not a supported image.",
                        kind.mime_type()
                    ));
                }
            }
        }

        if errors.is_empty() {
            info.push(format!(
                "Pixel dimensions are not checked automatically; streaming platforms expect at least {}x{} px square artwork.",
                self.limits.recommended_min_dimension_px, self.limits.recommended_min_dimension_px
            ));
        }

        let is_valid = errors.is_empty();
        let is_distribution_ready = is_valid && warnings.is_empty();
        let summary = if !is_valid {
            format!("Cover art rejected: {}", errors[0])
        } else if !is_distribution_ready {
            format!("Cover art accepted with {} warning(s).", warnings.len())
        } else {
            "Cover art meets format and size requirements.".to_string()
        };

        debug!(
            file = filename,
            format = ?format,
            size_bytes = size,
            is_valid,
            "Cover art validated"
        );

        CoverArtValidationResult {
            is_valid,
            is_distribution_ready,
            errors,
            warnings,
            info,
            format,
            file_size_bytes: size,
            summary,
        }
    }
}
