//! Boptone audio quality control
//!
//! Decides whether an uploaded audio file may be accepted and which quality tier it
//! qualifies for (rejected, boptone_only, distribution_ready, boptone_premium), with
//! structured diagnostics and recommendations for the artist.
//!
//! Operations:
//! - `AudioValidator::validate_audio_for_distribution` (async, runs the loudness tool)
//! - `AudioValidator::validate_cover_art`
//! - `AudioValidator::validate_audio_file` (legacy pre-check)

pub mod config;
pub mod error;
pub mod extractors;
pub mod gate;
pub mod pipeline;
pub mod types;
pub mod validators;

pub use crate::config::{QcConfigFile, ValidationConfig};
pub use crate::error::{QcError, QcResult};
pub use crate::gate::{AudioGate, DistributionGate, LegacyPrecheck};
pub use crate::pipeline::AudioValidator;
pub use crate::types::{
    AudioTechnicalProfile, AudioValidationResult, CoverArtValidationResult, IssueCode,
    LegacyValidation, LoudnessReport, QualityTier, Severity, ValidationIssue, ValidationOptions,
};
