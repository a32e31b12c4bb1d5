//! Audio metadata extraction
//!
//! Parses container/codec properties (duration, sample rate, bit depth, channels,
//! bitrate, codec, encoder) from the in-memory upload buffer.
//!
//! # Architecture
//! The parser sits behind the `MetadataSource` port so the rule engine can be tested
//! with canned properties. `LoftyMetadataSource` is the production implementation.
//!
//! Extraction never fails the validation call: `MetadataExtractor::extract` returns
//! `MetadataExtraction::Failed` and the pipeline skips every profile-dependent check.

use crate::types::{channel_layout, AudioTechnicalProfile, FormatInfo};
use lofty::config::ParseOptions;
use lofty::file::{FileType, TaggedFileExt};
use lofty::mp4::{Mp4Codec, Mp4File};
use lofty::prelude::*;
use lofty::probe::Probe;
use lofty::tag::ItemKey;
use std::io::Cursor;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Metadata parse errors
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The parser rejected the buffer
    #[error("Failed to parse audio: {0}")]
    Parse(String),

    /// The buffer parsed but a required property is missing
    #[error("Missing audio property: {0}")]
    NoAudioProperties(String),
}

/// Raw properties reported by a metadata source
///
/// Every field is optional; the extractor decides which ones are required.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedAudio {
    /// Container name as reported by the parser (e.g. "FLAC", "MPEG")
    pub container: Option<String>,
    /// Codec name (e.g. "ALAC", "AAC", "PCM")
    pub codec: Option<String>,
    pub sample_rate_hz: Option<u32>,
    pub bits_per_sample: Option<u16>,
    pub channels: Option<u16>,
    pub duration_secs: Option<f64>,
    /// Whether the codec is lossless, when the container can tell
    pub lossless: Option<bool>,
    pub bitrate_kbps: Option<u32>,
    /// Encoder software tag
    pub tool: Option<String>,
}

/// Metadata source port
///
/// # Example
/// ```rust,ignore
/// struct Canned(ParsedAudio);
///
/// impl MetadataSource for Canned {
///     fn name(&self) -> &'static str { "canned" }
///     fn parse(&self, _buffer: &[u8], _hint: &FormatInfo) -> Result<ParsedAudio, MetadataError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait MetadataSource: Send + Sync {
    /// Source name for logging
    fn name(&self) -> &'static str;

    /// Parse audio properties from `buffer`, using `hint` when content sniffing fails
    fn parse(&self, buffer: &[u8], hint: &FormatInfo) -> Result<ParsedAudio, MetadataError>;
}

/// Result of the extraction step
///
/// `Failed` is an intentional branch: the pipeline emits a warning and skips every
/// profile-dependent check.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataExtraction {
    Parsed(AudioTechnicalProfile),
    Failed(String),
}

/// Builds an `AudioTechnicalProfile` from a metadata source
pub struct MetadataExtractor {
    source: Arc<dyn MetadataSource>,
}

impl MetadataExtractor {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self { source }
    }

    /// Extract the technical profile
    ///
    /// Parser errors and parser panics both become `Failed`.
    pub fn extract(&self, buffer: &[u8], format: &FormatInfo) -> MetadataExtraction {
        let source = &self.source;
        let parsed = catch_unwind(AssertUnwindSafe(|| source.parse(buffer, format)));

        let parsed = match parsed {
            Ok(Ok(parsed)) => parsed,
            Ok(Err(e)) => {
                warn!(
                    source = source.name(),
                    format = %format.format,
                    error = %e,
                    "Metadata extraction failed"
                );
                return MetadataExtraction::Failed(e.to_string());
            }
            Err(_) => {
                warn!(
                    source = source.name(),
                    format = %format.format,
                    "Metadata parser panicked"
                );
                return MetadataExtraction::Failed(
                    "metadata parser aborted unexpectedly".to_string(),
                );
            }
        };

        match build_profile(parsed, buffer.len() as u64, format) {
            Ok(profile) => {
                debug!(
                    format = %profile.format,
                    codec = %profile.codec,
                    duration_s = profile.duration_seconds,
                    sample_rate = profile.sample_rate_hz,
                    bit_depth = ?profile.bit_depth,
                    channels = profile.channels,
                    bitrate_kbps = ?profile.bitrate_kbps,
                    "Extracted technical profile"
                );
                MetadataExtraction::Parsed(profile)
            }
            Err(e) => {
                warn!(source = source.name(), error = %e, "Metadata incomplete");
                MetadataExtraction::Failed(e.to_string())
            }
        }
    }
}

/// Combine parsed properties with the detected format
///
/// Duration, sample rate and channel count are required. Losslessness and codec
/// prefer the parser's answer and fall back to the format table.
fn build_profile(
    parsed: ParsedAudio,
    file_size_bytes: u64,
    format: &FormatInfo,
) -> Result<AudioTechnicalProfile, MetadataError> {
    let duration_seconds = parsed
        .duration_secs
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| MetadataError::NoAudioProperties("duration".to_string()))?;
    let sample_rate_hz = parsed
        .sample_rate_hz
        .filter(|r| *r > 0)
        .ok_or_else(|| MetadataError::NoAudioProperties("sample rate".to_string()))?;
    let channels = parsed
        .channels
        .filter(|c| *c > 0)
        .ok_or_else(|| MetadataError::NoAudioProperties("channel count".to_string()))?;

    Ok(AudioTechnicalProfile {
        format: format.format.clone(),
        mime_type: format.mime_type.clone(),
        file_size_bytes,
        duration_seconds,
        sample_rate_hz,
        bit_depth: parsed.bits_per_sample.filter(|b| *b > 0),
        channels,
        channel_layout: channel_layout(channels),
        bitrate_kbps: parsed.bitrate_kbps.filter(|b| *b > 0),
        is_lossless: parsed.lossless.unwrap_or(format.is_lossless),
        codec: parsed.codec.unwrap_or_else(|| format.codec.clone()),
        encoder: parsed.tool,
    })
}

// ============================================================================
// Lofty-backed source
// ============================================================================

/// Production metadata source using lofty
pub struct LoftyMetadataSource;

impl LoftyMetadataSource {
    pub fn new() -> Self {
        Self
    }

    /// Container name, codec and losslessness implied by a lofty file type
    fn describe(file_type: &FileType) -> (String, Option<&'static str>, Option<bool>) {
        match file_type {
            FileType::Mpeg => ("MPEG".to_string(), Some("MP3"), Some(false)),
            FileType::Flac => ("FLAC".to_string(), Some("FLAC"), Some(true)),
            FileType::Wav => ("WAVE".to_string(), Some("PCM"), Some(true)),
            FileType::Aiff => ("AIFF".to_string(), Some("PCM"), Some(true)),
            FileType::Aac => ("ADTS".to_string(), Some("AAC"), Some(false)),
            FileType::Mp4 => ("MPEG-4".to_string(), None, None),
            other => (format!("{:?}", other), None, None),
        }
    }

    /// MP4 needs a second look to tell ALAC from AAC
    fn mp4_codec(buffer: &[u8]) -> (Option<String>, Option<bool>) {
        let mut reader = Cursor::new(buffer);
        match Mp4File::read_from(&mut reader, ParseOptions::new()) {
            Ok(file) => match file.properties().codec() {
                Mp4Codec::ALAC => (Some("ALAC".to_string()), Some(true)),
                Mp4Codec::FLAC => (Some("FLAC".to_string()), Some(true)),
                Mp4Codec::AAC => (Some("AAC".to_string()), Some(false)),
                Mp4Codec::MP3 => (Some("MP3".to_string()), Some(false)),
                _ => (None, None),
            },
            Err(e) => {
                debug!(error = %e, "MP4 codec lookup failed");
                (None, None)
            }
        }
    }
}

impl Default for LoftyMetadataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetadataSource for LoftyMetadataSource {
    fn name(&self) -> &'static str {
        "lofty"
    }

    fn parse(&self, buffer: &[u8], hint: &FormatInfo) -> Result<ParsedAudio, MetadataError> {
        let mut probe = Probe::new(Cursor::new(buffer))
            .guess_file_type()
            .map_err(|e| MetadataError::Parse(e.to_string()))?;

        if probe.file_type().is_none() {
            if let Some(file_type) = FileType::from_ext(&hint.extension) {
                probe = probe.set_file_type(file_type);
            }
        }

        let tagged_file = probe
            .read()
            .map_err(|e| MetadataError::Parse(e.to_string()))?;

        let file_type = tagged_file.file_type();
        let (container, codec, lossless) = Self::describe(&file_type);
        let (codec, lossless) = if file_type == FileType::Mp4 {
            Self::mp4_codec(buffer)
        } else {
            (codec.map(str::to_string), lossless)
        };

        let properties = tagged_file.properties();
        let tool = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag())
            .and_then(|tag| tag.get_string(&ItemKey::EncoderSoftware))
            .map(str::to_string);

        Ok(ParsedAudio {
            container: Some(container),
            codec,
            sample_rate_hz: properties.sample_rate(),
            bits_per_sample: properties.bit_depth().map(u16::from),
            channels: properties.channels().map(u16::from),
            duration_secs: Some(properties.duration().as_secs_f64()),
            lossless,
            // lofty reports kbps
            bitrate_kbps: properties.audio_bitrate().or(properties.overall_bitrate()),
            tool,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::mock::*;
    use super::*;
    use crate::config::ValidationConfig;

    fn flac() -> FormatInfo {
        ValidationConfig::default().lookup_format("flac").unwrap()
    }

    fn m4a() -> FormatInfo {
        ValidationConfig::default().lookup_format("m4a").unwrap()
    }

    fn stereo_cd() -> ParsedAudio {
        ParsedAudio {
            container: Some("FLAC".to_string()),
            codec: Some("FLAC".to_string()),
            sample_rate_hz: Some(44_100),
            bits_per_sample: Some(16),
            channels: Some(2),
            duration_secs: Some(180.0),
            lossless: Some(true),
            bitrate_kbps: Some(900),
            tool: Some("reference libFLAC 1.4.3".to_string()),
        }
    }

    #[test]
    fn test_extract_builds_profile() {
        let extractor = MetadataExtractor::new(Arc::new(MockMetadataSource::parsed(stereo_cd())));

        match extractor.extract(&[0u8; 1024], &flac()) {
            MetadataExtraction::Parsed(profile) => {
                assert_eq!(profile.format, "FLAC");
                assert_eq!(profile.mime_type, "audio/flac");
                assert_eq!(profile.file_size_bytes, 1024);
                assert_eq!(profile.channel_layout, "stereo");
                assert_eq!(profile.bit_depth, Some(16));
                assert_eq!(profile.encoder.as_deref(), Some("reference libFLAC 1.4.3"));
                assert!(profile.is_lossless);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parser_lossless_flag_overrides_table() {
        let parsed = ParsedAudio {
            codec: Some("ALAC".to_string()),
            lossless: Some(true),
            ..stereo_cd()
        };
        let extractor = MetadataExtractor::new(Arc::new(MockMetadataSource::parsed(parsed)));

        match extractor.extract(&[], &m4a()) {
            MetadataExtraction::Parsed(profile) => {
                assert!(profile.is_lossless);
                assert_eq!(profile.codec, "ALAC");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_table_used_when_parser_silent() {
        let parsed = ParsedAudio {
            codec: None,
            lossless: None,
            ..stereo_cd()
        };
        let extractor = MetadataExtractor::new(Arc::new(MockMetadataSource::parsed(parsed)));

        match extractor.extract(&[], &m4a()) {
            MetadataExtraction::Parsed(profile) => {
                assert!(!profile.is_lossless);
                assert_eq!(profile.codec, "AAC");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    /// MPEG-1 Layer III frames (128 kbps, 44.1 kHz, joint stereo) behind more junk
    /// than content sniffing searches through
    fn mp3_behind_junk() -> Vec<u8> {
        let mut bytes = vec![b'J'; 2048];
        for _ in 0..40 {
            bytes.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x64]);
            bytes.extend(std::iter::repeat(0u8).take(417 - 4));
        }
        bytes
    }

    #[test]
    fn test_lofty_falls_back_to_extension_hint() {
        let bytes = mp3_behind_junk();
        let sniffed = Probe::new(Cursor::new(&bytes[..])).guess_file_type().unwrap();
        assert!(sniffed.file_type().is_none());

        let mp3 = ValidationConfig::default().lookup_format("mp3").unwrap();
        let parsed = LoftyMetadataSource::new().parse(&bytes, &mp3).unwrap();

        assert_eq!(parsed.container.as_deref(), Some("MPEG"));
        assert_eq!(parsed.codec.as_deref(), Some("MP3"));
        assert_eq!(parsed.lossless, Some(false));
        assert_eq!(parsed.sample_rate_hz, Some(44_100));
        assert_eq!(parsed.channels, Some(2));
        assert!(parsed.duration_secs.unwrap() > 0.0);
    }

    #[test]
    fn test_parse_error_becomes_failed() {
        let extractor = MetadataExtractor::new(Arc::new(MockMetadataSource::failing("bad header")));
        match extractor.extract(&[1, 2, 3], &flac()) {
            MetadataExtraction::Failed(reason) => assert!(reason.contains("bad header")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_missing_sample_rate_becomes_failed() {
        let parsed = ParsedAudio {
            sample_rate_hz: None,
            ..stereo_cd()
        };
        let extractor = MetadataExtractor::new(Arc::new(MockMetadataSource::parsed(parsed)));
        match extractor.extract(&[], &flac()) {
            MetadataExtraction::Failed(reason) => assert!(reason.contains("sample rate")),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parser_panic_is_contained() {
        let extractor = MetadataExtractor::new(Arc::new(PanickingMetadataSource));
        assert!(matches!(
            extractor.extract(&[], &flac()),
            MetadataExtraction::Failed(_)
        ));
    }

    #[test]
    fn test_lofty_rejects_garbage() {
        let source = LoftyMetadataSource::new();
        let garbage = vec![0x42u8; 4096];
        assert!(source.parse(&garbage, &flac()).is_err());
    }
}
