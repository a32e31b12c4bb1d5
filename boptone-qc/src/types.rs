//! Core types for audio quality control
//!
//! Defines the data model shared by the extractors, the rule engine, the tier
//! classifier and the result builder:
//! - **AudioTechnicalProfile**: immutable snapshot of parsed audio properties
//! - **ValidationIssue**: one severity-tagged finding with a stable code
//! - **LoudnessReport**: integrated loudness, true peak and platform readiness
//! - **QualityTier**: ordered verdict
//!   (rejected < boptone_only < distribution_ready < boptone_premium)
//! - **AudioValidationResult** / **CoverArtValidationResult**: final reports
//!
//! All report types serialise with camelCase fields so the upload pipeline can persist
//! them verbatim.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Issues
// ============================================================================

/// Issue severity
///
/// Errors block the upload, warnings block external distribution, info is advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// Stable issue codes for programmatic branching
///
/// Serialised as SCREAMING_SNAKE_CASE (e.g. `DURATION_TOO_SHORT`). Never rename a
/// variant without a migration for persisted issue lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueCode {
    // Structural
    UnsupportedFormat,
    // Size
    FileTooLarge,
    FileTooSmall,
    // Metadata extraction
    MetadataParseError,
    // Duration
    DurationTooShort,
    DurationTooLong,
    // Sample rate
    SampleRateTooLow,
    SampleRateNonstandard,
    // Bit depth
    BitDepthTooLow,
    BitDepthAcceptable,
    // Channels
    TooManyChannels,
    MonoNotAllowed,
    MonoAudio,
    // Bitrate
    BitrateTooLow,
    BitrateSuboptimal,
    // Format class
    LossyFormat,
    // Loudness
    AudioClipping,
    TruePeakHigh,
    LoudnessExtremelyHigh,
    LoudnessHigh,
    LoudnessTooLow,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueCode::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            IssueCode::FileTooLarge => "FILE_TOO_LARGE",
            IssueCode::FileTooSmall => "FILE_TOO_SMALL",
            IssueCode::MetadataParseError => "METADATA_PARSE_ERROR",
            IssueCode::DurationTooShort => "DURATION_TOO_SHORT",
            IssueCode::DurationTooLong => "DURATION_TOO_LONG",
            IssueCode::SampleRateTooLow => "SAMPLE_RATE_TOO_LOW",
            IssueCode::SampleRateNonstandard => "SAMPLE_RATE_NONSTANDARD",
            IssueCode::BitDepthTooLow => "BIT_DEPTH_TOO_LOW",
            IssueCode::BitDepthAcceptable => "BIT_DEPTH_ACCEPTABLE",
            IssueCode::TooManyChannels => "TOO_MANY_CHANNELS",
            IssueCode::MonoNotAllowed => "MONO_NOT_ALLOWED",
            IssueCode::MonoAudio => "MONO_AUDIO",
            IssueCode::BitrateTooLow => "BITRATE_TOO_LOW",
            IssueCode::BitrateSuboptimal => "BITRATE_SUBOPTIMAL",
            IssueCode::LossyFormat => "LOSSY_FORMAT",
            IssueCode::AudioClipping => "AUDIO_CLIPPING",
            IssueCode::TruePeakHigh => "TRUE_PEAK_HIGH",
            IssueCode::LoudnessExtremelyHigh => "LOUDNESS_EXTREMELY_HIGH",
            IssueCode::LoudnessHigh => "LOUDNESS_HIGH",
            IssueCode::LoudnessTooLow => "LOUDNESS_TOO_LOW",
        }
    }
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    /// Stable code (e.g. `SAMPLE_RATE_TOO_LOW`)
    pub code: IssueCode,
    /// Severity
    pub severity: Severity,
    /// Profile field the issue refers to (e.g. "sampleRate")
    pub field: String,
    /// Human-readable message
    pub message: String,
    /// Observed value, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
    /// Requirement the value failed, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirement: Option<String>,
}

impl ValidationIssue {
    pub fn new(
        code: IssueCode,
        severity: Severity,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code,
            severity,
            field: field.into(),
            message: message.into(),
            value: None,
            requirement: None,
        }
    }

    pub fn error(code: IssueCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Error, field, message)
    }

    pub fn warning(code: IssueCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Warning, field, message)
    }

    pub fn info(code: IssueCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Info, field, message)
    }

    /// Attach the observed value
    pub fn with_value(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Attach the requirement text
    pub fn with_requirement(mut self, requirement: impl Into<String>) -> Self {
        self.requirement = Some(requirement.into());
        self
    }
}

// ============================================================================
// Format and technical profile
// ============================================================================

/// Container/codec family resolved from a filename extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatInfo {
    /// Lower-cased extension without the dot (e.g. "flac")
    pub extension: String,
    /// Display name (e.g. "FLAC")
    pub format: String,
    /// MIME type (e.g. "audio/flac")
    pub mime_type: String,
    /// Codec family (e.g. "PCM", "AAC")
    pub codec: String,
    /// Whether the family is lossless
    pub is_lossless: bool,
}

/// Immutable snapshot of the audio's technical properties
///
/// Computed once per validation call and never persisted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioTechnicalProfile {
    pub format: String,
    pub mime_type: String,
    pub file_size_bytes: u64,
    pub duration_seconds: f64,
    pub sample_rate_hz: u32,
    pub bit_depth: Option<u16>,
    pub channels: u16,
    pub channel_layout: String,
    pub bitrate_kbps: Option<u32>,
    pub is_lossless: bool,
    pub codec: String,
    pub encoder: Option<String>,
}

/// Human label for a channel count
pub fn channel_layout(channels: u16) -> String {
    match channels {
        1 => "mono".to_string(),
        2 => "stereo".to_string(),
        n => format!("{}-channel", n),
    }
}

// ============================================================================
// Loudness
// ============================================================================

/// Readiness against one streaming platform's loudness target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformCompliance {
    pub platform: String,
    pub target_lufs: f64,
    pub tolerance_lu: f64,
    /// Measured loudness minus target (positive = louder than target)
    pub deviation_lu: f64,
    pub ready: bool,
}

/// Loudness measurement report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoudnessReport {
    pub integrated_lufs: f64,
    /// None when the tool could not determine the true peak
    pub true_peak_dbtp: Option<f64>,
    pub loudness_range: Option<f64>,
    /// `true_peak_dbtp > clipping threshold`; false when the true peak is unknown
    pub is_clipping: bool,
    pub spotify_ready: bool,
    pub apple_music_ready: bool,
    pub youtube_ready: bool,
    /// Readiness for every configured platform target
    pub platforms: Vec<PlatformCompliance>,
    pub recommendation: String,
}

// ============================================================================
// Tiers and results
// ============================================================================

/// Quality tier, ordered from worst to best
///
/// The ordering is meaningful: `tier >= QualityTier::DistributionReady` reads as
/// "at least distribution ready".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Rejected,
    BoptoneOnly,
    DistributionReady,
    BoptonePremium,
}

impl QualityTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Rejected => "rejected",
            QualityTier::BoptoneOnly => "boptone_only",
            QualityTier::DistributionReady => "distribution_ready",
            QualityTier::BoptonePremium => "boptone_premium",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call options for the full validator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ValidationOptions {
    /// Skip the external loudness measurement entirely
    pub skip_loudness: bool,
    /// Accept mono audio with a warning instead of rejecting it
    pub allow_mono: bool,
    /// Lossy bitrate floor in kbps
    pub min_mp3_bitrate_kbps: u32,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            skip_loudness: false,
            allow_mono: true,
            min_mp3_bitrate_kbps: 128,
        }
    }
}

/// Final report for one audio validation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioValidationResult {
    /// `errors.is_empty()`
    pub is_uploadable: bool,
    /// `errors.is_empty() && warnings.is_empty()`
    pub is_distribution_ready: bool,
    pub quality_tier: QualityTier,
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<ValidationIssue>,
    pub info: Vec<ValidationIssue>,
    pub technical_profile: Option<AudioTechnicalProfile>,
    pub loudness_report: Option<LoudnessReport>,
    pub summary: String,
    /// Deduplicated, in first-seen order
    pub recommendations: Vec<String>,
}

impl AudioValidationResult {
    /// All issues, errors first
    pub fn issues(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .chain(self.info.iter())
    }

    /// Whether any issue carries `code`
    pub fn has_issue(&self, code: IssueCode) -> bool {
        self.issues().any(|issue| issue.code == code)
    }
}

/// Coarse verdict returned by the legacy pre-check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyValidation {
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

// ============================================================================
// Cover art
// ============================================================================

/// Image formats the cover-art validator can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
    Bmp,
    Tiff,
}

impl ImageFormat {
    /// Map a lower-cased extension to a format
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::Webp),
            "bmp" => Some(ImageFormat::Bmp),
            "tif" | "tiff" => Some(ImageFormat::Tiff),
            _ => None,
        }
    }

    /// Map a sniffed MIME type to a format
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/jpeg" => Some(ImageFormat::Jpeg),
            "image/png" => Some(ImageFormat::Png),
            "image/gif" => Some(ImageFormat::Gif),
            "image/webp" => Some(ImageFormat::Webp),
            "image/bmp" => Some(ImageFormat::Bmp),
            "image/tiff" => Some(ImageFormat::Tiff),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Png => "PNG",
            ImageFormat::Gif => "GIF",
            ImageFormat::Webp => "WebP",
            ImageFormat::Bmp => "BMP",
            ImageFormat::Tiff => "TIFF",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cover-art validation report (independent of any audio result)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverArtValidationResult {
    /// `errors.is_empty()`
    pub is_valid: bool,
    /// `is_valid && warnings.is_empty()`
    pub is_distribution_ready: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    /// Advisory notes that do not affect readiness
    pub info: Vec<String>,
    pub format: Option<ImageFormat>,
    pub file_size_bytes: u64,
    pub summary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(QualityTier::Rejected < QualityTier::BoptoneOnly);
        assert!(QualityTier::BoptoneOnly < QualityTier::DistributionReady);
        assert!(QualityTier::DistributionReady < QualityTier::BoptonePremium);
    }

    #[test]
    fn test_tier_serialisation() {
        let json = serde_json::to_string(&QualityTier::DistributionReady).unwrap();
        assert_eq!(json, "\"distribution_ready\"");
        assert_eq!(QualityTier::BoptonePremium.to_string(), "boptone_premium");
    }

    #[test]
    fn test_issue_code_serialisation_matches_as_str() {
        for code in [
            IssueCode::UnsupportedFormat,
            IssueCode::SampleRateNonstandard,
            IssueCode::LoudnessExtremelyHigh,
            IssueCode::MonoNotAllowed,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_issue_builder() {
        let issue = ValidationIssue::error(IssueCode::DurationTooShort, "duration", "Too short")
            .with_value(12.5)
            .with_requirement("at least 30 seconds");

        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.value, Some(serde_json::json!(12.5)));
        assert_eq!(issue.requirement.as_deref(), Some("at least 30 seconds"));

        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["code"], "DURATION_TOO_SHORT");
        assert_eq!(json["severity"], "error");
    }

    #[test]
    fn test_channel_layout() {
        assert_eq!(channel_layout(1), "mono");
        assert_eq!(channel_layout(2), "stereo");
        assert_eq!(channel_layout(6), "6-channel");
    }

    #[test]
    fn test_default_options() {
        let options = ValidationOptions::default();
        assert!(!options.skip_loudness);
        assert!(options.allow_mono);
        assert_eq!(options.min_mp3_bitrate_kbps, 128);
    }

    #[test]
    fn test_image_format_mapping() {
        assert_eq!(ImageFormat::from_extension("jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_mime("image/png"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension("exe"), None);
    }
}
