//! Final report assembly
//!
//! Partitions issues by severity, derives the uploadable / distribution-ready flags,
//! classifies the tier, writes the summary and deduplicates recommendations.

use super::rule_engine::Findings;
use super::tier_classifier::classify;
use crate::config::AudioLimits;
use crate::types::{
    AudioTechnicalProfile, AudioValidationResult, LoudnessReport, QualityTier, Severity,
};
use std::collections::HashSet;

/// Short technical description, e.g. "24-bit/96 kHz stereo FLAC"
pub fn describe_profile(profile: &AudioTechnicalProfile) -> String {
    let rate = format_khz(profile.sample_rate_hz);
    match (profile.bit_depth, profile.bitrate_kbps, profile.is_lossless) {
        (Some(bits), _, true) => format!(
            "{}-bit/{} kHz {} {}",
            bits, rate, profile.channel_layout, profile.codec
        ),
        (_, Some(kbps), false) => format!(
            "{} kbps {} kHz {} {}",
            kbps, rate, profile.channel_layout, profile.codec
        ),
        _ => format!("{} kHz {} {}", rate, profile.channel_layout, profile.codec),
    }
}

fn format_khz(rate_hz: u32) -> String {
    if rate_hz % 1000 == 0 {
        format!("{}", rate_hz / 1000)
    } else {
        format!("{:.1}", rate_hz as f64 / 1000.0)
    }
}

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

/// Exact-match dedup, first occurrence wins
pub fn dedup_recommendations(recommendations: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    recommendations
        .into_iter()
        .filter(|r| seen.insert(r.clone()))
        .collect()
}

/// One sentence per tier
fn summarize(
    tier: QualityTier,
    result: &AudioValidationResult,
    profile: Option<&AudioTechnicalProfile>,
) -> String {
    let described = profile
        .map(describe_profile)
        .unwrap_or_else(|| "audio file".to_string());

    match tier {
        QualityTier::Rejected => {
            let first = result
                .errors
                .first()
                .map(|issue| issue.message.as_str())
                .unwrap_or("validation failed");
            format!(
                "Upload rejected with {}: {}.",
                plural(result.errors.len(), "blocking issue"),
                first
            )
        }
        QualityTier::BoptoneOnly => format!(
            "Accepted for Boptone streaming ({}); {} must be resolved before distribution to external platforms.",
            described,
            plural(result.warnings.len(), "warning")
        ),
        QualityTier::DistributionReady => format!(
            "Distribution ready: {} meets every streaming platform requirement.",
            described
        ),
        QualityTier::BoptonePremium => format!(
            "Premium quality: hi-res lossless {} qualifies for the Boptone premium tier.",
            described
        ),
    }
}

/// Assemble the final result
pub fn build_result(
    findings: Findings,
    profile: Option<AudioTechnicalProfile>,
    loudness_report: Option<LoudnessReport>,
    limits: &AudioLimits,
) -> AudioValidationResult {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut info = Vec::new();
    for issue in findings.issues {
        match issue.severity {
            Severity::Error => errors.push(issue),
            Severity::Warning => warnings.push(issue),
            Severity::Info => info.push(issue),
        }
    }

    let quality_tier = classify(errors.len(), warnings.len(), profile.as_ref(), limits);
    let mut result = AudioValidationResult {
        is_uploadable: errors.is_empty(),
        is_distribution_ready: errors.is_empty() && warnings.is_empty(),
        quality_tier,
        errors,
        warnings,
        info,
        technical_profile: None,
        loudness_report,
        summary: String::new(),
        recommendations: dedup_recommendations(findings.recommendations),
    };
    result.summary = summarize(quality_tier, &result, profile.as_ref());
    result.technical_profile = profile;
    result
}
