//! Rule engine
//!
//! A fixed set of independent checks, each appending zero or more severity-tagged
//! issues (plus free-text recommendations) to a `Findings` accumulator.
//!
//! # Checks
//! - **Structural**: unsupported or missing extension (error, short-circuits the pipeline)
//! - **Size**: above the ceiling or below the floor (error)
//! - **Metadata**: parse failure (warning; profile checks are skipped)
//! - **Profile**: duration, sample rate, bit depth (lossless only), channels,
//!   bitrate (lossy only), format class
//! - **Loudness**: clipping (error), true peak and integrated loudness (warning/info)
//!
//! Checks are order-insensitive: none reads another's output.

use crate::config::{AudioLimits, LoudnessConfig, ValidationConfig};
use crate::types::{
    AudioTechnicalProfile, IssueCode, LoudnessReport, ValidationIssue, ValidationOptions,
};
use serde_json::json;
use tracing::debug;

/// Issues and recommendations collected during one validation call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Findings {
    pub issues: Vec<ValidationIssue>,
    /// May contain duplicates; the result builder deduplicates
    pub recommendations: Vec<String>,
}

impl Findings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    pub fn recommend(&mut self, recommendation: impl Into<String>) {
        self.recommendations.push(recommendation.into());
    }

    pub fn has_issue(&self, code: IssueCode) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }
}

const LOSSLESS_EXPORT_HINT: &str =
    "Export a lossless master (WAV or FLAC, 24-bit) for distribution to streaming platforms.";

fn megabytes(bytes: u64) -> f64 {
    bytes as f64 / (1024.0 * 1024.0)
}

/// Rule engine over one configuration and one call's options
pub struct RuleEngine<'a> {
    config: &'a ValidationConfig,
    options: &'a ValidationOptions,
}

impl<'a> RuleEngine<'a> {
    pub fn new(config: &'a ValidationConfig, options: &'a ValidationOptions) -> Self {
        Self { config, options }
    }

    fn limits(&self) -> &AudioLimits {
        &self.config.limits
    }

    fn loudness(&self) -> &LoudnessConfig {
        &self.config.loudness
    }

    /// Unknown or missing extension
    pub fn check_unsupported_format(&self, extension: Option<&str>, findings: &mut Findings) {
        let supported = self.config.supported_extensions();
        let message = match extension {
            Some(ext) => format!(
                "Unsupported audio format '.{}'. Supported formats: {}",
                ext, supported
            ),
            None => format!(
                "File has no extension, so its audio format cannot be determined. Supported formats: {}",
                supported
            ),
        };

        let mut issue = ValidationIssue::error(IssueCode::UnsupportedFormat, "format", message)
            .with_requirement(supported);
        if let Some(ext) = extension {
            issue = issue.with_value(ext);
        }
        findings.push(issue);
        findings.recommend(LOSSLESS_EXPORT_HINT);
    }

    /// Size guard, independent of metadata parsing (the legacy pre-check passes its own ceiling)
    pub fn check_size_bounds(
        size_bytes: u64,
        min_bytes: u64,
        max_bytes: u64,
        findings: &mut Findings,
    ) {
        if size_bytes > max_bytes {
            findings.push(
                ValidationIssue::error(
                    IssueCode::FileTooLarge,
                    "fileSize",
                    format!(
                        "File is {:.1} MB, above the {:.0} MB limit",
                        megabytes(size_bytes),
                        megabytes(max_bytes)
                    ),
                )
                .with_value(size_bytes)
                .with_requirement(format!("at most {} bytes", max_bytes)),
            );
            findings.recommend(
                "Split very long recordings or export at a lower sample rate to reduce file size.",
            );
        } else if size_bytes < min_bytes {
            findings.push(
                ValidationIssue::error(
                    IssueCode::FileTooSmall,
                    "fileSize",
                    format!(
                        "File is only {} bytes; it is likely empty or truncated",
                        size_bytes
                    ),
                )
                .with_value(size_bytes)
                .with_requirement(format!("at least {} bytes", min_bytes)),
            );
            findings.recommend("Re-export the track from your DAW and upload the complete file.");
        }
    }

    /// Metadata extraction failed: warn, never reject
    pub fn check_metadata_failure(&self, reason: &str, findings: &mut Findings) {
        findings.push(
            ValidationIssue::warning(
                IssueCode::MetadataParseError,
                "metadata",
                format!("Could not read audio properties: {}", reason),
            )
            .with_value(reason),
        );
        findings.recommend(
            "The file header could not be read. Re-export the track so its technical quality can be verified.",
        );
    }

    /// Every profile-dependent check
    pub fn check_profile(&self, profile: &AudioTechnicalProfile, findings: &mut Findings) {
        self.check_duration(profile, findings);
        self.check_sample_rate(profile, findings);
        self.check_bit_depth(profile, findings);
        self.check_channels(profile, findings);
        self.check_bitrate(profile, findings);
        self.check_format_class(profile, findings);

        debug!(
            format = %profile.format,
            issues = findings.issues.len(),
            "Profile checks complete"
        );
    }

    fn check_duration(&self, profile: &AudioTechnicalProfile, findings: &mut Findings) {
        let limits = self.limits();
        let duration = profile.duration_seconds;

        if duration < limits.min_duration_secs {
            findings.push(
                ValidationIssue::error(
                    IssueCode::DurationTooShort,
                    "duration",
                    format!(
                        "Track is {:.1} seconds long; the minimum is {:.0} seconds",
                        duration, limits.min_duration_secs
                    ),
                )
                .with_value(duration)
                .with_requirement(format!("at least {:.0} seconds", limits.min_duration_secs)),
            );
            findings.recommend(
                "Upload the full track; streaming platforms reject clips shorter than 30 seconds.",
            );
        } else if duration > limits.max_duration_secs {
            findings.push(
                ValidationIssue::error(
                    IssueCode::DurationTooLong,
                    "duration",
                    format!(
                        "Track is {:.0} seconds long; the maximum is {:.0} seconds",
                        duration, limits.max_duration_secs
                    ),
                )
                .with_value(duration)
                .with_requirement(format!("at most {:.0} seconds", limits.max_duration_secs)),
            );
            findings.recommend("Split the recording into separate tracks.");
        }
    }

    fn check_sample_rate(&self, profile: &AudioTechnicalProfile, findings: &mut Findings) {
        let limits = self.limits();
        let rate = profile.sample_rate_hz;

        if rate < limits.min_sample_rate_hz {
            findings.push(
                ValidationIssue::error(
                    IssueCode::SampleRateTooLow,
                    "sampleRate",
                    format!(
                        "Sample rate of {} Hz is below the {} Hz minimum",
                        rate, limits.min_sample_rate_hz
                    ),
                )
                .with_value(rate)
                .with_requirement(format!("at least {} Hz", limits.min_sample_rate_hz)),
            );
            findings.recommend("Export at 44.1 kHz or higher.");
        } else if !limits.standard_sample_rates_hz.contains(&rate) {
            let standard = limits
                .standard_sample_rates_hz
                .iter()
                .map(|r| r.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            findings.push(
                ValidationIssue::warning(
                    IssueCode::SampleRateNonstandard,
                    "sampleRate",
                    format!("Sample rate of {} Hz is not a standard distribution rate", rate),
                )
                .with_value(rate)
                .with_requirement(format!("one of {} Hz", standard)),
            );
            findings.recommend("Resample to 44.1, 48, 88.2 or 96 kHz before distribution.");
        }
    }

    fn check_bit_depth(&self, profile: &AudioTechnicalProfile, findings: &mut Findings) {
        if !profile.is_lossless {
            return;
        }
        let Some(bits) = profile.bit_depth else {
            return;
        };
        let limits = self.limits();

        if bits < limits.min_bit_depth {
            findings.push(
                ValidationIssue::error(
                    IssueCode::BitDepthTooLow,
                    "bitDepth",
                    format!(
                        "Bit depth of {} bits is below the {}-bit minimum",
                        bits, limits.min_bit_depth
                    ),
                )
                .with_value(bits)
                .with_requirement(format!("at least {} bits", limits.min_bit_depth)),
            );
            findings.recommend("Export at 16-bit or higher; 24-bit is preferred.");
        } else if bits == limits.min_bit_depth {
            findings.push(
                ValidationIssue::info(
                    IssueCode::BitDepthAcceptable,
                    "bitDepth",
                    format!(
                        "{}-bit audio is accepted; {}-bit masters qualify for the premium tier",
                        bits, limits.premium_min_bit_depth
                    ),
                )
                .with_value(bits),
            );
            findings.recommend("Upload a 24-bit master if you have one.");
        }
    }

    fn check_channels(&self, profile: &AudioTechnicalProfile, findings: &mut Findings) {
        let limits = self.limits();
        let channels = profile.channels;

        if channels > limits.max_channels {
            findings.push(
                ValidationIssue::error(
                    IssueCode::TooManyChannels,
                    "channels",
                    format!(
                        "{} audio is not supported; at most {} channels are allowed",
                        profile.channel_layout, limits.max_channels
                    ),
                )
                .with_value(channels)
                .with_requirement(format!("at most {} channels", limits.max_channels)),
            );
            findings.recommend("Provide a stereo mixdown.");
        } else if channels == 1 {
            if self.options.allow_mono {
                findings.push(
                    ValidationIssue::warning(
                        IssueCode::MonoAudio,
                        "channels",
                        "Mono audio; most platforms expect stereo",
                    )
                    .with_value(channels),
                );
            } else {
                findings.push(
                    ValidationIssue::error(
                        IssueCode::MonoNotAllowed,
                        "channels",
                        "Mono audio is not accepted for this upload",
                    )
                    .with_value(channels)
                    .with_requirement("2 channels"),
                );
            }
            findings.recommend("Export a stereo file, even for mono sources.");
        }
    }

    fn check_bitrate(&self, profile: &AudioTechnicalProfile, findings: &mut Findings) {
        if profile.is_lossless {
            return;
        }
        let Some(kbps) = profile.bitrate_kbps else {
            return;
        };
        let min_kbps = self.options.min_mp3_bitrate_kbps;
        let optimal_kbps = self.limits().optimal_bitrate_kbps;

        if kbps < min_kbps {
            findings.push(
                ValidationIssue::error(
                    IssueCode::BitrateTooLow,
                    "bitrate",
                    format!("Bitrate of {} kbps is below the {} kbps minimum", kbps, min_kbps),
                )
                .with_value(kbps)
                .with_requirement(format!("at least {} kbps", min_kbps)),
            );
            findings.recommend(format!("Re-encode from the master at {} kbps.", optimal_kbps));
        } else if kbps < optimal_kbps {
            findings.push(
                ValidationIssue::info(
                    IssueCode::BitrateSuboptimal,
                    "bitrate",
                    format!("Bitrate of {} kbps is below the optimal {} kbps", kbps, optimal_kbps),
                )
                .with_value(kbps),
            );
            findings.recommend(format!("Re-encode from the master at {} kbps.", optimal_kbps));
        }
    }

    /// Lossy sources never reach the distribution tiers
    fn check_format_class(&self, profile: &AudioTechnicalProfile, findings: &mut Findings) {
        if profile.is_lossless {
            return;
        }
        findings.push(
            ValidationIssue::warning(
                IssueCode::LossyFormat,
                "format",
                format!(
                    "{} ({}) is a lossy format; lossy sources can be streamed on Boptone but not distributed",
                    profile.format, profile.codec
                ),
            )
            .with_value(profile.codec.clone())
            .with_requirement("lossless source (WAV, FLAC, AIFF or ALAC)"),
        );
        findings.recommend(LOSSLESS_EXPORT_HINT);
    }

    /// Loudness checks; only called when a report exists
    pub fn check_loudness(&self, report: &LoudnessReport, findings: &mut Findings) {
        let loudness = self.loudness();

        if let Some(tp) = report.true_peak_dbtp {
            if tp > loudness.clipping_threshold_dbtp {
                findings.push(
                    ValidationIssue::error(
                        IssueCode::AudioClipping,
                        "truePeak",
                        format!("True peak of {:+.1} dBTP means the audio clips", tp),
                    )
                    .with_value(json!(tp))
                    .with_requirement(format!(
                        "at most {:.1} dBTP",
                        loudness.clipping_threshold_dbtp
                    )),
                );
                findings.recommend(report.recommendation.clone());
            } else if tp > loudness.true_peak_warning_dbtp {
                findings.push(
                    ValidationIssue::warning(
                        IssueCode::TruePeakHigh,
                        "truePeak",
                        format!(
                            "True peak of {:+.1} dBTP leaves no headroom for lossy encoding",
                            tp
                        ),
                    )
                    .with_value(json!(tp))
                    .with_requirement(format!(
                        "at most {:.1} dBTP",
                        loudness.true_peak_warning_dbtp
                    )),
                );
                findings.recommend(format!(
                    "Set your limiter ceiling to {:.1} dBTP.",
                    loudness.true_peak_warning_dbtp
                ));
            }
        }

        let lufs = report.integrated_lufs;
        if lufs > loudness.extremely_high_lufs {
            findings.push(
                ValidationIssue::warning(
                    IssueCode::LoudnessExtremelyHigh,
                    "integratedLoudness",
                    format!("Integrated loudness of {:.1} LUFS is extremely high", lufs),
                )
                .with_value(json!(lufs))
                .with_requirement(format!("at most {:.0} LUFS", loudness.extremely_high_lufs)),
            );
            findings.recommend(report.recommendation.clone());
        } else if lufs > loudness.high_lufs {
            findings.push(
                ValidationIssue::info(
                    IssueCode::LoudnessHigh,
                    "integratedLoudness",
                    format!(
                        "Integrated loudness of {:.1} LUFS is loud; platforms will turn it down",
                        lufs
                    ),
                )
                .with_value(json!(lufs)),
            );
        } else if lufs < loudness.too_low_lufs {
            findings.push(
                ValidationIssue::warning(
                    IssueCode::LoudnessTooLow,
                    "integratedLoudness",
                    format!("Integrated loudness of {:.1} LUFS is very quiet", lufs),
                )
                .with_value(json!(lufs))
                .with_requirement(format!("at least {:.0} LUFS", loudness.too_low_lufs)),
            );
            findings.recommend(report.recommendation.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::loudness_analyzer::{build_report, LoudnessMeasurement};
    use crate::types::{channel_layout, Severity};

    fn profile() -> AudioTechnicalProfile {
        AudioTechnicalProfile {
            format: "FLAC".to_string(),
            mime_type: "audio/flac".to_string(),
            file_size_bytes: 5 * 1024 * 1024,
            duration_seconds: 180.0,
            sample_rate_hz: 44_100,
            bit_depth: Some(24),
            channels: 2,
            channel_layout: "stereo".to_string(),
            bitrate_kbps: Some(1_000),
            is_lossless: true,
            codec: "FLAC".to_string(),
            encoder: None,
        }
    }

    fn mp3(kbps: u32) -> AudioTechnicalProfile {
        AudioTechnicalProfile {
            format: "MP3".to_string(),
            mime_type: "audio/mpeg".to_string(),
            bit_depth: None,
            bitrate_kbps: Some(kbps),
            is_lossless: false,
            codec: "MP3".to_string(),
            ..profile()
        }
    }

    fn run_profile(profile: &AudioTechnicalProfile, options: &ValidationOptions) -> Findings {
        let config = ValidationConfig::default();
        let mut findings = Findings::new();
        RuleEngine::new(&config, options).check_profile(profile, &mut findings);
        findings
    }

    fn codes(findings: &Findings) -> Vec<IssueCode> {
        findings.issues.iter().map(|i| i.code).collect()
    }

    fn severity_of(findings: &Findings, code: IssueCode) -> Option<Severity> {
        findings.issues.iter().find(|i| i.code == code).map(|i| i.severity)
    }

    fn run_loudness(lufs: f64, true_peak: Option<f64>) -> Findings {
        let config = ValidationConfig::default();
        let options = ValidationOptions::default();
        let report = build_report(
            &LoudnessMeasurement {
                integrated_lufs: lufs,
                true_peak_dbtp: true_peak,
                loudness_range: None,
            },
            &config.loudness,
        );
        let mut findings = Findings::new();
        RuleEngine::new(&config, &options).check_loudness(&report, &mut findings);
        findings
    }

    #[test]
    fn test_clean_lossless_profile_has_no_issues() {
        let findings = run_profile(&profile(), &ValidationOptions::default());
        assert!(findings.issues.is_empty(), "{:?}", findings.issues);
    }

    #[test]
    fn test_duration_boundaries() {
        let options = ValidationOptions::default();
        let at = |duration_seconds: f64| {
            let profile = AudioTechnicalProfile {
                duration_seconds,
                ..profile()
            };
            run_profile(&profile, &options)
        };

        assert_eq!(
            severity_of(&at(29.9), IssueCode::DurationTooShort),
            Some(Severity::Error)
        );
        assert!(codes(&at(30.0)).is_empty());
        assert!(codes(&at(36_000.0)).is_empty());
        assert_eq!(
            severity_of(&at(36_000.5), IssueCode::DurationTooLong),
            Some(Severity::Error)
        );
    }

    #[test]
    fn test_sample_rate_rules() {
        let options = ValidationOptions::default();
        let at = |sample_rate_hz: u32| {
            let profile = AudioTechnicalProfile {
                sample_rate_hz,
                ..profile()
            };
            run_profile(&profile, &options)
        };

        assert_eq!(
            severity_of(&at(22_050), IssueCode::SampleRateTooLow),
            Some(Severity::Error)
        );
        assert_eq!(
            severity_of(&at(44_099), IssueCode::SampleRateTooLow),
            Some(Severity::Error)
        );
        for rate in [44_100, 48_000, 88_200, 96_000] {
            assert!(codes(&at(rate)).is_empty(), "{}", rate);
        }
        let odd = at(192_000);
        assert_eq!(codes(&odd), vec![IssueCode::SampleRateNonstandard]);
        assert_eq!(odd.issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_bit_depth_rules() {
        let options = ValidationOptions::default();
        let at = |bit_depth: Option<u16>| {
            let profile = AudioTechnicalProfile {
                bit_depth,
                ..profile()
            };
            run_profile(&profile, &options)
        };

        assert_eq!(
            severity_of(&at(Some(8)), IssueCode::BitDepthTooLow),
            Some(Severity::Error)
        );
        assert_eq!(
            severity_of(&at(Some(16)), IssueCode::BitDepthAcceptable),
            Some(Severity::Info)
        );
        assert!(codes(&at(Some(24))).is_empty());
        assert!(codes(&at(Some(32))).is_empty());
        assert!(codes(&at(None)).is_empty());
    }

    #[test]
    fn test_bit_depth_ignored_for_lossy() {
        let profile = AudioTechnicalProfile {
            bit_depth: Some(8),
            ..mp3(320)
        };
        let findings = run_profile(&profile, &ValidationOptions::default());
        assert!(!findings.has_issue(IssueCode::BitDepthTooLow));
    }

    #[test]
    fn test_channel_rules() {
        let allow = ValidationOptions::default();
        let disallow = ValidationOptions {
            allow_mono: false,
            ..ValidationOptions::default()
        };
        let with = |channels: u16| AudioTechnicalProfile {
            channels,
            channel_layout: channel_layout(channels),
            ..profile()
        };

        let surround = run_profile(&with(6), &allow);
        assert_eq!(
            severity_of(&surround, IssueCode::TooManyChannels),
            Some(Severity::Error)
        );
        let mono = run_profile(&with(1), &allow);
        assert_eq!(
            severity_of(&mono, IssueCode::MonoAudio),
            Some(Severity::Warning)
        );
        let mono_disallowed = run_profile(&with(1), &disallow);
        assert_eq!(
            severity_of(&mono_disallowed, IssueCode::MonoNotAllowed),
            Some(Severity::Error)
        );
        assert!(codes(&run_profile(&with(2), &disallow)).is_empty());
    }

    #[test]
    fn test_bitrate_rules() {
        let options = ValidationOptions::default();

        let low = run_profile(&mp3(96), &options);
        assert_eq!(
            severity_of(&low, IssueCode::BitrateTooLow),
            Some(Severity::Error)
        );

        let mid = run_profile(&mp3(128), &options);
        assert_eq!(
            severity_of(&mid, IssueCode::BitrateSuboptimal),
            Some(Severity::Info)
        );
        assert!(!mid.has_issue(IssueCode::BitrateTooLow));

        let high = run_profile(&mp3(320), &options);
        assert!(!high.has_issue(IssueCode::BitrateSuboptimal));
    }

    #[test]
    fn test_custom_bitrate_floor() {
        let options = ValidationOptions {
            min_mp3_bitrate_kbps: 192,
            ..ValidationOptions::default()
        };
        let findings = run_profile(&mp3(160), &options);
        assert!(findings.has_issue(IssueCode::BitrateTooLow));
    }

    #[test]
    fn test_lossy_always_warned() {
        let findings = run_profile(&mp3(320), &ValidationOptions::default());
        assert_eq!(codes(&findings), vec![IssueCode::LossyFormat]);
        assert_eq!(findings.issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_alac_counts_as_lossless() {
        let alac = AudioTechnicalProfile {
            format: "M4A".to_string(),
            codec: "ALAC".to_string(),
            ..profile()
        };
        let findings = run_profile(&alac, &ValidationOptions::default());
        assert!(!findings.has_issue(IssueCode::LossyFormat));
    }

    #[test]
    fn test_size_guard() {
        let limits = ValidationConfig::default().limits;
        let check = |size: u64| {
            let mut findings = Findings::new();
            RuleEngine::check_size_bounds(
                size,
                limits.min_file_size_bytes,
                limits.max_file_size_bytes,
                &mut findings,
            );
            findings
        };

        assert!(check(0).has_issue(IssueCode::FileTooSmall));
        assert!(check(50 * 1024).issues.is_empty());
        assert!(check(2 * 1024 * 1024 * 1024 + 1).has_issue(IssueCode::FileTooLarge));
    }

    #[test]
    fn test_unsupported_format_message() {
        let config = ValidationConfig::default();
        let options = ValidationOptions::default();
        let mut findings = Findings::new();
        RuleEngine::new(&config, &options).check_unsupported_format(Some("exe"), &mut findings);

        let issue = &findings.issues[0];
        assert_eq!(issue.code, IssueCode::UnsupportedFormat);
        assert_eq!(issue.severity, Severity::Error);
        assert!(issue.message.contains(".exe"));
        assert!(issue.message.contains(".flac"));
    }

    #[test]
    fn test_metadata_failure_is_warning() {
        let config = ValidationConfig::default();
        let options = ValidationOptions::default();
        let mut findings = Findings::new();
        RuleEngine::new(&config, &options).check_metadata_failure("bad header", &mut findings);

        assert_eq!(findings.issues[0].code, IssueCode::MetadataParseError);
        assert_eq!(findings.issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_true_peak_boundaries() {
        let at = |true_peak: f64| run_loudness(-14.0, Some(true_peak));

        assert_eq!(
            severity_of(&at(0.5), IssueCode::AudioClipping),
            Some(Severity::Error)
        );
        assert_eq!(
            severity_of(&at(0.0), IssueCode::TruePeakHigh),
            Some(Severity::Warning)
        );
        assert_eq!(
            severity_of(&at(-0.5), IssueCode::TruePeakHigh),
            Some(Severity::Warning)
        );
        assert!(codes(&at(-1.0)).is_empty());
    }

    #[test]
    fn test_unknown_true_peak_never_clips() {
        let findings = run_loudness(-14.0, None);
        assert!(!findings.has_issue(IssueCode::AudioClipping));
        assert!(!findings.has_issue(IssueCode::TruePeakHigh));
    }

    #[test]
    fn test_integrated_loudness_boundaries() {
        let at = |lufs: f64| run_loudness(lufs, Some(-2.0));

        assert_eq!(
            severity_of(&at(-5.0), IssueCode::LoudnessExtremelyHigh),
            Some(Severity::Warning)
        );
        assert_eq!(
            severity_of(&at(-6.0), IssueCode::LoudnessHigh),
            Some(Severity::Info)
        );
        assert_eq!(
            severity_of(&at(-8.5), IssueCode::LoudnessHigh),
            Some(Severity::Info)
        );
        assert!(codes(&at(-9.0)).is_empty());
        assert!(codes(&at(-24.0)).is_empty());
        assert_eq!(
            severity_of(&at(-24.5), IssueCode::LoudnessTooLow),
            Some(Severity::Warning)
        );
    }
}
