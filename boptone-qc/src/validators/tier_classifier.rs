//! Quality tier classification
//!
//! Pure decision table, evaluated top to bottom:
//! 1. any error → `Rejected`
//! 2. no warnings, lossless, bit depth ≥ 24, sample rate ≥ 96 kHz → `BoptonePremium`
//! 3. no warnings → `DistributionReady`
//! 4. otherwise → `BoptoneOnly`
//!
//! The premium bar needs a technical profile; without one the best possible tier is
//! `DistributionReady`.

use crate::config::AudioLimits;
use crate::types::{AudioTechnicalProfile, QualityTier};

/// Whether the profile clears the hi-res lossless bar
pub fn meets_premium_bar(profile: &AudioTechnicalProfile, limits: &AudioLimits) -> bool {
    profile.is_lossless
        && profile
            .bit_depth
            .map(|bits| bits >= limits.premium_min_bit_depth)
            .unwrap_or(false)
        && profile.sample_rate_hz >= limits.premium_min_sample_rate_hz
}

/// Map issue counts and the profile to a tier
pub fn classify(
    error_count: usize,
    warning_count: usize,
    profile: Option<&AudioTechnicalProfile>,
    limits: &AudioLimits,
) -> QualityTier {
    if error_count > 0 {
        return QualityTier::Rejected;
    }
    if warning_count > 0 {
        return QualityTier::BoptoneOnly;
    }
    match profile {
        Some(profile) if meets_premium_bar(profile, limits) => QualityTier::BoptonePremium,
        _ => QualityTier::DistributionReady,
    }
}
