//! Loudness analysis (integrated LUFS, true peak, loudness range)
//!
//! Runs an external EBU R128 measurement tool (ffmpeg's `loudnorm` filter in
//! analysis mode) against a scoped temporary copy of the upload.
//!
//! # Architecture
//! The tool sits behind the `LoudnessMeasurer` port. `LoudnessAnalyzer` wraps any
//! measurer and turns every failure (tool missing, non-zero exit, timeout, unparsable
//! output) into `LoudnessOutcome::Unavailable`. Loudness measurement never blocks an
//! otherwise valid upload.
//!
//! # Resource handling
//! - The temporary file is a `NamedTempFile`, removed when dropped on every exit path
//! - The child process is spawned with `kill_on_drop`, so a timeout also kills it
//! - No retries; the caller owns retry and concurrency policy

use crate::config::LoudnessConfig;
use crate::types::{FormatInfo, LoudnessReport, PlatformCompliance};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// Loudness measurement errors
#[derive(Debug, Error)]
pub enum LoudnessError {
    /// Tool binary not found
    #[error("Loudness tool not found: {0}")]
    ToolNotFound(String),

    /// Failed to spawn or wait for the tool
    #[error("Failed to run loudness tool: {0}")]
    Spawn(String),

    /// Tool exited with a failure status
    #[error("Loudness tool exited with status {code:?}: {stderr}")]
    ExitStatus { code: Option<i32>, stderr: String },

    /// Tool did not finish in time
    #[error("Loudness tool timed out after {0:?}")]
    Timeout(Duration),

    /// Tool output did not contain a usable measurement
    #[error("Failed to parse loudness output: {0}")]
    OutputParse(String),

    /// Temporary file could not be created or written
    #[error("Temporary file error: {0}")]
    TempFile(#[from] std::io::Error),
}

/// Raw measurement from a loudness tool
#[derive(Debug, Clone, PartialEq)]
pub struct LoudnessMeasurement {
    pub integrated_lufs: f64,
    /// None when the tool reported a non-finite true peak
    pub true_peak_dbtp: Option<f64>,
    pub loudness_range: Option<f64>,
}

/// Loudness measurement port
#[async_trait]
pub trait LoudnessMeasurer: Send + Sync {
    /// Measurer name for logging
    fn name(&self) -> &'static str;

    /// Measure `buffer`, whose container is described by `format`
    async fn measure(
        &self,
        buffer: &[u8],
        format: &FormatInfo,
    ) -> Result<LoudnessMeasurement, LoudnessError>;
}

/// Outcome of the loudness step
#[derive(Debug, Clone, PartialEq)]
pub enum LoudnessOutcome {
    Measured(LoudnessReport),
    /// Tool missing, failed, timed out or printed nothing usable
    Unavailable(String),
}

impl LoudnessOutcome {
    pub fn into_report(self) -> Option<LoudnessReport> {
        match self {
            LoudnessOutcome::Measured(report) => Some(report),
            LoudnessOutcome::Unavailable(_) => None,
        }
    }
}

/// Wraps a measurer, degrading failures to `Unavailable` and building the report
pub struct LoudnessAnalyzer {
    measurer: Arc<dyn LoudnessMeasurer>,
    config: LoudnessConfig,
}

impl LoudnessAnalyzer {
    pub fn new(measurer: Arc<dyn LoudnessMeasurer>, config: LoudnessConfig) -> Self {
        Self { measurer, config }
    }

    /// Measure and build a report; never fails
    pub async fn analyze(&self, buffer: &[u8], format: &FormatInfo) -> LoudnessOutcome {
        match self.measurer.measure(buffer, format).await {
            Ok(measurement) => {
                debug!(
                    measurer = self.measurer.name(),
                    integrated_lufs = measurement.integrated_lufs,
                    true_peak_dbtp = ?measurement.true_peak_dbtp,
                    lra = ?measurement.loudness_range,
                    "Loudness measured"
                );
                LoudnessOutcome::Measured(build_report(&measurement, &self.config))
            }
            Err(e) => {
                warn!(
                    measurer = self.measurer.name(),
                    format = %format.format,
                    error = %e,
                    "Loudness measurement unavailable, continuing without report"
                );
                LoudnessOutcome::Unavailable(e.to_string())
            }
        }
    }
}

/// Build a report from a measurement and the configured thresholds
pub fn build_report(measurement: &LoudnessMeasurement, config: &LoudnessConfig) -> LoudnessReport {
    let lufs = measurement.integrated_lufs;

    let platforms: Vec<PlatformCompliance> = config
        .platforms
        .iter()
        .map(|target| {
            let deviation_lu = lufs - target.target_lufs;
            PlatformCompliance {
                platform: target.name.clone(),
                target_lufs: target.target_lufs,
                tolerance_lu: target.tolerance_lu,
                deviation_lu,
                ready: deviation_lu.abs() <= target.tolerance_lu,
            }
        })
        .collect();

    let ready = |name: &str| platforms.iter().any(|p| p.platform == name && p.ready);
    let is_clipping = measurement
        .true_peak_dbtp
        .map(|tp| tp > config.clipping_threshold_dbtp)
        .unwrap_or(false);

    LoudnessReport {
        integrated_lufs: lufs,
        true_peak_dbtp: measurement.true_peak_dbtp,
        loudness_range: measurement.loudness_range,
        is_clipping,
        spotify_ready: ready("spotify"),
        apple_music_ready: ready("apple_music"),
        youtube_ready: ready("youtube"),
        recommendation: recommendation(measurement, is_clipping, &platforms, config),
        platforms,
    }
}

fn recommendation(
    measurement: &LoudnessMeasurement,
    is_clipping: bool,
    platforms: &[PlatformCompliance],
    config: &LoudnessConfig,
) -> String {
    let lufs = measurement.integrated_lufs;
    let near_peak = measurement
        .true_peak_dbtp
        .map(|tp| tp > config.true_peak_warning_dbtp)
        .unwrap_or(false);

    if is_clipping {
        format!(
            "True peak exceeds {:.1} dBTP. Apply a true-peak limiter with a {:.1} dBTP ceiling and re-export.",
            config.clipping_threshold_dbtp, config.true_peak_warning_dbtp
        )
    } else if lufs > config.extremely_high_lufs {
        format!(
            "Integrated loudness of {:.1} LUFS is extremely high. Streaming platforms will turn it down; ease off the limiter to keep dynamics.",
            lufs
        )
    } else if lufs < config.too_low_lufs {
        format!(
            "Integrated loudness of {:.1} LUFS is very quiet. Raise it toward -14 LUFS for streaming.",
            lufs
        )
    } else if near_peak {
        format!(
            "True peak is close to 0 dBTP. Lower the limiter ceiling to {:.1} dBTP to avoid clipping after lossy encoding.",
            config.true_peak_warning_dbtp
        )
    } else if platforms.iter().all(|p| p.ready) {
        "Loudness is within every streaming platform target.".to_string()
    } else {
        let off: Vec<&str> = platforms
            .iter()
            .filter(|p| !p.ready)
            .map(|p| p.platform.as_str())
            .collect();
        format!(
            "Loudness is outside the target for {}; those platforms will normalise playback volume.",
            off.join(", ")
        )
    }
}

// ============================================================================
// ffmpeg-backed measurer
// ============================================================================

/// Measures loudness by running `ffmpeg -af loudnorm=print_format=json`
pub struct FfmpegLoudnessMeasurer {
    tool_path: PathBuf,
    timeout: Duration,
}

impl FfmpegLoudnessMeasurer {
    pub fn new(tool_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            tool_path: tool_path.into(),
            timeout,
        }
    }

    pub fn from_config(config: &LoudnessConfig) -> Self {
        Self::new(config.tool_path.clone(), config.timeout())
    }
}

#[async_trait]
impl LoudnessMeasurer for FfmpegLoudnessMeasurer {
    fn name(&self) -> &'static str {
        "ffmpeg-loudnorm"
    }

    async fn measure(
        &self,
        buffer: &[u8],
        format: &FormatInfo,
    ) -> Result<LoudnessMeasurement, LoudnessError> {
        // Dropped (and deleted) on every return path below
        let temp_file = tempfile::Builder::new()
            .prefix("boptone_loudness_")
            .suffix(&format!(".{}", format.extension))
            .tempfile()?;
        let mut file = tokio::fs::File::from_std(temp_file.reopen()?);
        file.write_all(buffer).await?;
        file.flush().await?;
        drop(file);

        debug!(
            tool = %self.tool_path.display(),
            input = %temp_file.path().display(),
            bytes = buffer.len(),
            "Running loudness measurement"
        );

        let child = Command::new(&self.tool_path)
            .arg("-hide_banner")
            .arg("-nostats")
            .arg("-i")
            .arg(temp_file.path())
            .args(["-af", "loudnorm=print_format=json", "-f", "null", "-"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    LoudnessError::ToolNotFound(self.tool_path.display().to_string())
                } else {
                    LoudnessError::Spawn(e.to_string())
                }
            })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| LoudnessError::Timeout(self.timeout))?
            .map_err(|e| LoudnessError::Spawn(e.to_string()))?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        if !output.status.success() {
            return Err(LoudnessError::ExitStatus {
                code: output.status.code(),
                stderr: tail(&stderr, 400),
            });
        }

        let measurement = parse_loudnorm_output(&stderr)?;
        info!(
            integrated_lufs = measurement.integrated_lufs,
            true_peak_dbtp = ?measurement.true_peak_dbtp,
            "Loudness measurement complete"
        );
        Ok(measurement)
    }
}

/// Last `max_chars` characters of tool output, for error messages
fn tail(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    let count = trimmed.chars().count();
    if count <= max_chars {
        trimmed.to_string()
    } else {
        trimmed.chars().skip(count - max_chars).collect()
    }
}

/// loudnorm analysis block; ffmpeg prints every value as a string
#[derive(Debug, Deserialize)]
struct LoudnormStats {
    input_i: String,
    input_tp: String,
    input_lra: String,
}

/// Extract the measurement from ffmpeg's loudnorm output
///
/// The JSON block is the last `{ ... }` in the output. Values may be "-inf" for
/// digital silence: a non-finite integrated loudness is an error, a non-finite true
/// peak or range becomes None.
pub fn parse_loudnorm_output(output: &str) -> Result<LoudnessMeasurement, LoudnessError> {
    let start = output
        .rfind('{')
        .ok_or_else(|| LoudnessError::OutputParse("no JSON block in output".to_string()))?;
    let end = output[start..]
        .find('}')
        .map(|offset| start + offset)
        .ok_or_else(|| LoudnessError::OutputParse("unterminated JSON block".to_string()))?;

    let stats: LoudnormStats = serde_json::from_str(&output[start..=end])
        .map_err(|e| LoudnessError::OutputParse(e.to_string()))?;

    let integrated_lufs = parse_level(&stats.input_i).ok_or_else(|| {
        LoudnessError::OutputParse(format!(
            "integrated loudness not measurable: {}",
            stats.input_i
        ))
    })?;

    Ok(LoudnessMeasurement {
        integrated_lufs,
        true_peak_dbtp: parse_level(&stats.input_tp),
        loudness_range: parse_level(&stats.input_lra),
    })
}

fn parse_level(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
