//! Upload gates
//!
//! The full distribution validator and the coarse legacy pre-check are two adapters
//! over one `AudioValidator`, so both share the same format table and size guard.
//!
//! # Example
//! ```rust,ignore
//! let validator = Arc::new(AudioValidator::new(ValidationConfig::default()));
//! let gate = LegacyPrecheck::new(validator.clone(), 100);
//! let verdict = gate.check(&bytes, "track.flac").await;
//! if !LegacyPrecheck::accepts(&verdict) { ... }
//! ```

use crate::pipeline::AudioValidator;
use crate::types::{AudioValidationResult, LegacyValidation, ValidationOptions};
use async_trait::async_trait;
use std::sync::Arc;

/// A check an upload must pass
#[async_trait]
pub trait AudioGate: Send + Sync {
    type Verdict: Send;

    /// Gate name for logging
    fn name(&self) -> &'static str;

    /// Run the check
    async fn check(&self, buffer: &[u8], filename: &str) -> Self::Verdict;

    /// Whether the verdict lets the upload through
    fn accepts(verdict: &Self::Verdict) -> bool;
}

/// Full distribution-readiness validation
pub struct DistributionGate {
    validator: Arc<AudioValidator>,
    options: ValidationOptions,
}

impl DistributionGate {
    pub fn new(validator: Arc<AudioValidator>, options: ValidationOptions) -> Self {
        Self { validator, options }
    }
}

#[async_trait]
impl AudioGate for DistributionGate {
    type Verdict = AudioValidationResult;

    fn name(&self) -> &'static str {
        "distribution"
    }

    async fn check(&self, buffer: &[u8], filename: &str) -> AudioValidationResult {
        self.validator
            .validate_audio_for_distribution(buffer, filename, &self.options)
            .await
    }

    fn accepts(verdict: &AudioValidationResult) -> bool {
        verdict.is_uploadable
    }
}

/// Legacy pre-check: extension and size only
pub struct LegacyPrecheck {
    validator: Arc<AudioValidator>,
    max_size_mb: u64,
}

impl LegacyPrecheck {
    pub fn new(validator: Arc<AudioValidator>, max_size_mb: u64) -> Self {
        Self {
            validator,
            max_size_mb,
        }
    }
}

#[async_trait]
impl AudioGate for LegacyPrecheck {
    type Verdict = LegacyValidation;

    fn name(&self) -> &'static str {
        "legacy-precheck"
    }

    async fn check(&self, buffer: &[u8], filename: &str) -> LegacyValidation {
        self.validator
            .validate_audio_file(buffer, filename, self.max_size_mb)
    }

    fn accepts(verdict: &LegacyValidation) -> bool {
        verdict.is_valid
    }
}
