//! Validation configuration
//!
//! Every threshold table the engine uses lives in one read-only `ValidationConfig`
//! value that is passed into the validator. `Default` reproduces the production
//! thresholds; a TOML file may override any subset of them.
//!
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [validation.limits]
//! min_duration_secs = 20.0
//!
//! [validation.loudness]
//! tool_path = "/usr/local/bin/ffmpeg"
//! timeout_secs = 60
//! ```

use crate::error::{QcError, QcResult};
use crate::types::{FormatInfo, ImageFormat};
use boptone_common::config::{
    load_toml_or_default, parse_toml, resolve_config_path, LoggingConfig,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming the configuration file
pub const CONFIG_ENV_VAR: &str = "BOPTONE_QC_CONFIG";

/// Default configuration file name in the user config directory
pub const CONFIG_FILE_NAME: &str = "boptone-qc.toml";

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;
const GIB: u64 = 1024 * MIB;

/// Top-level configuration file
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct QcConfigFile {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl QcConfigFile {
    /// Resolve (CLI → env → user config dir) and load the configuration file
    pub fn load(cli_path: Option<&Path>) -> QcResult<Self> {
        let path = resolve_config_path(cli_path, CONFIG_ENV_VAR, CONFIG_FILE_NAME);
        let config: Self = load_toml_or_default(path.as_deref())?;
        config.validation.validate()?;
        Ok(config)
    }

    /// Parse from a TOML string
    pub fn from_toml_str(content: &str) -> QcResult<Self> {
        let config: Self = parse_toml(content)?;
        config.validation.validate()?;
        Ok(config)
    }
}

/// Read-only threshold tables for one validator
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ValidationConfig {
    /// Extension → container/codec table
    pub formats: Vec<FormatEntry>,
    pub limits: AudioLimits,
    pub loudness: LoudnessConfig,
    pub cover_art: CoverArtLimits,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            formats: default_formats(),
            limits: AudioLimits::default(),
            loudness: LoudnessConfig::default(),
            cover_art: CoverArtLimits::default(),
        }
    }
}

impl ValidationConfig {
    /// Look up a lower-cased extension (without the dot)
    pub fn lookup_format(&self, extension: &str) -> Option<FormatInfo> {
        self.formats
            .iter()
            .find(|entry| entry.extensions.iter().any(|e| e == extension))
            .map(|entry| FormatInfo {
                extension: extension.to_string(),
                format: entry.format.clone(),
                mime_type: entry.mime_type.clone(),
                codec: entry.codec.clone(),
                is_lossless: entry.lossless,
            })
    }

    /// Comma-separated list of accepted extensions for messages
    pub fn supported_extensions(&self) -> String {
        self.formats
            .iter()
            .flat_map(|entry| entry.extensions.iter())
            .map(|ext| format!(".{}", ext))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Check that thresholds are internally consistent
    pub fn validate(&self) -> QcResult<()> {
        let limits = &self.limits;
        if self.formats.is_empty() {
            return Err(QcError::Config("formats table is empty".to_string()));
        }
        if limits.min_file_size_bytes >= limits.max_file_size_bytes {
            return Err(QcError::Config(
                "limits.min_file_size_bytes must be below limits.max_file_size_bytes".to_string(),
            ));
        }
        if limits.min_duration_secs >= limits.max_duration_secs {
            return Err(QcError::Config(
                "limits.min_duration_secs must be below limits.max_duration_secs".to_string(),
            ));
        }
        if limits.max_channels == 0 {
            return Err(QcError::Config("limits.max_channels must be at least 1".to_string()));
        }

        let loudness = &self.loudness;
        if loudness.timeout_secs == 0 {
            return Err(QcError::Config("loudness.timeout_secs must be positive".to_string()));
        }
        if !(loudness.too_low_lufs < loudness.high_lufs
            && loudness.high_lufs < loudness.extremely_high_lufs)
        {
            return Err(QcError::Config(
                "loudness thresholds must satisfy too_low_lufs < high_lufs < extremely_high_lufs"
                    .to_string(),
            ));
        }
        if loudness.true_peak_warning_dbtp >= loudness.clipping_threshold_dbtp {
            return Err(QcError::Config(
                "loudness.true_peak_warning_dbtp must be below loudness.clipping_threshold_dbtp"
                    .to_string(),
            ));
        }
        if let Some(bad) = loudness.platforms.iter().find(|p| p.tolerance_lu < 0.0) {
            return Err(QcError::Config(format!(
                "platform '{}' has a negative tolerance",
                bad.name
            )));
        }

        let art = &self.cover_art;
        if art.min_file_size_bytes >= art.max_file_size_bytes {
            return Err(QcError::Config(
                "cover_art.min_file_size_bytes must be below cover_art.max_file_size_bytes"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// One row of the format table
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct FormatEntry {
    pub extensions: Vec<String>,
    pub format: String,
    pub mime_type: String,
    pub codec: String,
    pub lossless: bool,
}

impl FormatEntry {
    fn new(
        extensions: &[&str],
        format: &str,
        mime_type: &str,
        codec: &str,
        lossless: bool,
    ) -> Self {
        Self {
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            format: format.to_string(),
            mime_type: mime_type.to_string(),
            codec: codec.to_string(),
            lossless,
        }
    }
}

fn default_formats() -> Vec<FormatEntry> {
    vec![
        FormatEntry::new(&["wav"], "WAV", "audio/wav", "PCM", true),
        FormatEntry::new(&["flac"], "FLAC", "audio/flac", "FLAC", true),
        FormatEntry::new(&["aiff", "aif"], "AIFF", "audio/aiff", "PCM", true),
        FormatEntry::new(&["mp3"], "MP3", "audio/mpeg", "MP3", false),
        FormatEntry::new(&["m4a"], "M4A", "audio/mp4", "AAC", false),
        FormatEntry::new(&["aac"], "AAC", "audio/aac", "AAC", false),
    ]
}

/// Size, duration and signal-format thresholds
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AudioLimits {
    pub max_file_size_bytes: u64,
    pub min_file_size_bytes: u64,
    pub min_duration_secs: f64,
    pub max_duration_secs: f64,
    pub min_sample_rate_hz: u32,
    pub standard_sample_rates_hz: Vec<u32>,
    pub min_bit_depth: u16,
    pub max_channels: u16,
    /// Lossy bitrates below this are flagged as suboptimal
    pub optimal_bitrate_kbps: u32,
    pub premium_min_bit_depth: u16,
    pub premium_min_sample_rate_hz: u32,
}

impl Default for AudioLimits {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 2 * GIB,
            min_file_size_bytes: 50 * KIB,
            min_duration_secs: 30.0,
            max_duration_secs: 36_000.0,
            min_sample_rate_hz: 44_100,
            standard_sample_rates_hz: vec![44_100, 48_000, 88_200, 96_000],
            min_bit_depth: 16,
            max_channels: 2,
            optimal_bitrate_kbps: 320,
            premium_min_bit_depth: 24,
            premium_min_sample_rate_hz: 96_000,
        }
    }
}

/// External loudness tool and loudness thresholds
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoudnessConfig {
    /// Path or command name of the loudness tool (ffmpeg with the loudnorm filter)
    pub tool_path: PathBuf,
    pub timeout_secs: u64,
    /// True peak strictly above this is clipping (error)
    pub clipping_threshold_dbtp: f64,
    /// True peak strictly above this (and not clipping) is a warning
    pub true_peak_warning_dbtp: f64,
    /// Integrated loudness strictly above this is a warning
    pub extremely_high_lufs: f64,
    /// Integrated loudness strictly above this (and not extreme) is info
    pub high_lufs: f64,
    /// Integrated loudness strictly below this is a warning
    pub too_low_lufs: f64,
    pub platforms: Vec<PlatformTarget>,
}

impl LoudnessConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LoudnessConfig {
    fn default() -> Self {
        Self {
            tool_path: PathBuf::from("ffmpeg"),
            timeout_secs: 120,
            clipping_threshold_dbtp: 0.0,
            true_peak_warning_dbtp: -1.0,
            extremely_high_lufs: -6.0,
            high_lufs: -9.0,
            too_low_lufs: -24.0,
            platforms: default_platforms(),
        }
    }
}

/// A streaming platform's loudness-normalisation target
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PlatformTarget {
    pub name: String,
    pub target_lufs: f64,
    pub tolerance_lu: f64,
}

impl PlatformTarget {
    fn new(name: &str, target_lufs: f64, tolerance_lu: f64) -> Self {
        Self {
            name: name.to_string(),
            target_lufs,
            tolerance_lu,
        }
    }
}

fn default_platforms() -> Vec<PlatformTarget> {
    vec![
        PlatformTarget::new("spotify", -14.0, 3.0),
        PlatformTarget::new("apple_music", -16.0, 3.0),
        PlatformTarget::new("youtube", -14.0, 3.0),
        PlatformTarget::new("amazon", -14.0, 3.0),
        PlatformTarget::new("tidal", -14.0, 3.0),
        PlatformTarget::new("deezer", -15.0, 3.0),
    ]
}

/// Cover-art limits
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CoverArtLimits {
    pub max_file_size_bytes: u64,
    pub min_file_size_bytes: u64,
    pub allowed_formats: Vec<ImageFormat>,
    /// Minimum edge length distributors expect (not verified, reported as a note)
    pub recommended_min_dimension_px: u32,
}

impl Default for CoverArtLimits {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 30 * MIB,
            min_file_size_bytes: 10 * KIB,
            allowed_formats: vec![ImageFormat::Jpeg, ImageFormat::Png],
            recommended_min_dimension_px: 3000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ValidationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_size_limits() {
        let limits = AudioLimits::default();
        assert_eq!(limits.max_file_size_bytes, 2 * 1024 * 1024 * 1024);
        assert_eq!(limits.min_file_size_bytes, 50 * 1024);
    }

    #[test]
    fn test_lookup_format() {
        let config = ValidationConfig::default();

        let aif = config.lookup_format("aif").unwrap();
        assert_eq!(aif.format, "AIFF");
        assert!(aif.is_lossless);

        let m4a = config.lookup_format("m4a").unwrap();
        assert_eq!(m4a.mime_type, "audio/mp4");
        assert!(!m4a.is_lossless);

        assert!(config.lookup_format("exe").is_none());
    }

    #[test]
    fn test_six_platform_targets() {
        let names: Vec<_> = LoudnessConfig::default()
            .platforms
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(
            names,
            ["spotify", "apple_music", "youtube", "amazon", "tidal", "deezer"]
        );
    }

    #[test]
    fn test_partial_toml_overrides_only_named_fields() {
        let config = QcConfigFile::from_toml_str(
            r#"
            [logging]
            level = "debug"

            [validation.limits]
            min_duration_secs = 20.0

            [validation.loudness]
            timeout_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.validation.limits.min_duration_secs, 20.0);
        assert_eq!(config.validation.limits.max_duration_secs, 36_000.0);
        assert_eq!(config.validation.loudness.timeout(), Duration::from_secs(5));
        assert_eq!(config.validation.loudness.platforms.len(), 6);
    }

    #[test]
    fn test_inconsistent_thresholds_rejected() {
        let result = QcConfigFile::from_toml_str(
            r#"
            [validation.loudness]
            high_lufs = -5.0
            "#,
        );
        assert!(matches!(result, Err(QcError::Config(_))));

        let result = QcConfigFile::from_toml_str(
            r#"
            [validation.limits]
            min_duration_secs = 50000.0
            "#,
        );
        assert!(matches!(result, Err(QcError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = ValidationConfig::default();
        config.loudness.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_supported_extensions_message() {
        let list = ValidationConfig::default().supported_extensions();
        assert!(list.starts_with(".wav, .flac"));
        assert!(list.contains(".aac"));
    }
}
