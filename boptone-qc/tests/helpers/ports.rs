//! Canned implementations of the metadata and loudness ports

use async_trait::async_trait;
use boptone_qc::extractors::{
    LoudnessError, LoudnessMeasurement, LoudnessMeasurer, MetadataError, MetadataSource,
    ParsedAudio,
};
use boptone_qc::types::FormatInfo;
use boptone_qc::{AudioValidator, ValidationConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Metadata source returning fixed properties, or failing
pub struct CannedSource {
    result: Result<ParsedAudio, String>,
}

impl CannedSource {
    pub fn parsed(parsed: ParsedAudio) -> Arc<Self> {
        Arc::new(Self { result: Ok(parsed) })
    }

    pub fn failing(reason: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Err(reason.to_string()),
        })
    }
}

impl MetadataSource for CannedSource {
    fn name(&self) -> &'static str {
        "canned"
    }

    fn parse(&self, _buffer: &[u8], _hint: &FormatInfo) -> Result<ParsedAudio, MetadataError> {
        self.result.clone().map_err(MetadataError::Parse)
    }
}

/// Deterministic loudness measurer with a call counter
pub struct ScriptedMeasurer {
    measurement: Option<LoudnessMeasurement>,
    calls: AtomicUsize,
}

impl ScriptedMeasurer {
    pub fn measuring(integrated_lufs: f64, true_peak_dbtp: Option<f64>) -> Arc<Self> {
        Arc::new(Self {
            measurement: Some(LoudnessMeasurement {
                integrated_lufs,
                true_peak_dbtp,
                loudness_range: Some(5.5),
            }),
            calls: AtomicUsize::new(0),
        })
    }

    /// Behaves like a missing tool
    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            measurement: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LoudnessMeasurer for ScriptedMeasurer {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn measure(
        &self,
        _buffer: &[u8],
        _format: &FormatInfo,
    ) -> Result<LoudnessMeasurement, LoudnessError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.measurement
            .clone()
            .ok_or_else(|| LoudnessError::ToolNotFound("scripted".to_string()))
    }
}

/// FLAC properties as the metadata library would report them
pub fn flac_props(sample_rate: u32, bits: u16, channels: u16, duration: f64) -> ParsedAudio {
    ParsedAudio {
        container: Some("FLAC".to_string()),
        codec: Some("FLAC".to_string()),
        sample_rate_hz: Some(sample_rate),
        bits_per_sample: Some(bits),
        channels: Some(channels),
        duration_secs: Some(duration),
        lossless: Some(true),
        bitrate_kbps: Some(900),
        tool: Some("reference libFLAC 1.4.3".to_string()),
    }
}

/// MP3 properties (no bit depth)
pub fn mp3_props(sample_rate: u32, kbps: u32, duration: f64) -> ParsedAudio {
    ParsedAudio {
        container: Some("MPEG".to_string()),
        codec: Some("MP3".to_string()),
        sample_rate_hz: Some(sample_rate),
        bits_per_sample: None,
        channels: Some(2),
        duration_secs: Some(duration),
        lossless: Some(false),
        bitrate_kbps: Some(kbps),
        tool: Some("LAME3.100".to_string()),
    }
}

pub fn validator_with(
    source: Arc<dyn MetadataSource>,
    measurer: Arc<dyn LoudnessMeasurer>,
) -> AudioValidator {
    AudioValidator::with_components(ValidationConfig::default(), source, measurer)
}
