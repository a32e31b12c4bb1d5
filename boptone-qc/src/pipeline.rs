//! Validation pipeline
//!
//! Wires the stages together for one upload:
//!
//! ```text
//! FormatDetector ──► size guard ──► MetadataExtractor ──► RuleEngine ──► TierClassifier ──► ResultBuilder
//!                                   LoudnessAnalyzer ───┘
//! ```
//!
//! `AudioValidator` holds only read-only configuration and the two ports, so one
//! instance can serve concurrent calls. Loudness measurement is the single await point.

use crate::config::ValidationConfig;
use crate::extractors::format_detector::{FormatDetection, FormatDetector};
use crate::extractors::loudness_analyzer::{
    FfmpegLoudnessMeasurer, LoudnessAnalyzer, LoudnessMeasurer,
};
use crate::extractors::metadata_extractor::{
    LoftyMetadataSource, MetadataExtraction, MetadataExtractor, MetadataSource,
};
use crate::types::{
    AudioValidationResult, CoverArtValidationResult, FormatInfo, IssueCode, LegacyValidation,
    ValidationOptions,
};
use crate::validators::cover_art::CoverArtValidator;
use crate::validators::result_builder::build_result;
use crate::validators::rule_engine::{Findings, RuleEngine};
use std::sync::Arc;
use tracing::{debug, info};

const MIB: u64 = 1024 * 1024;

/// Output of the format and size stage
#[derive(Debug, Clone)]
pub struct Screening {
    /// None when the extension is unsupported
    pub format: Option<FormatInfo>,
    pub findings: Findings,
}

impl Screening {
    /// Whether the upload exceeded the size ceiling
    pub fn too_large(&self) -> bool {
        self.findings.has_issue(IssueCode::FileTooLarge)
    }
}

/// Audio and cover-art validator
pub struct AudioValidator {
    config: Arc<ValidationConfig>,
    metadata: MetadataExtractor,
    loudness: LoudnessAnalyzer,
    cover_art: CoverArtValidator,
}

impl AudioValidator {
    /// Validator backed by lofty and the configured ffmpeg binary
    pub fn new(config: ValidationConfig) -> Self {
        let measurer = FfmpegLoudnessMeasurer::from_config(&config.loudness);
        Self::with_components(
            config,
            Arc::new(LoftyMetadataSource::new()),
            Arc::new(measurer),
        )
    }

    /// Validator with explicit ports
    pub fn with_components(
        config: ValidationConfig,
        metadata_source: Arc<dyn MetadataSource>,
        measurer: Arc<dyn LoudnessMeasurer>,
    ) -> Self {
        let loudness = LoudnessAnalyzer::new(measurer, config.loudness.clone());
        let cover_art = CoverArtValidator::new(config.cover_art.clone());
        Self {
            config: Arc::new(config),
            metadata: MetadataExtractor::new(metadata_source),
            loudness,
            cover_art,
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Format detection and size guard, shared by the full validator and the pre-check
    pub fn screen(
        &self,
        size_bytes: u64,
        filename: &str,
        min_bytes: u64,
        max_bytes: u64,
    ) -> Screening {
        let options = ValidationOptions::default();
        let engine = RuleEngine::new(&self.config, &options);
        let mut findings = Findings::new();

        match FormatDetector::new(&self.config).detect(filename) {
            FormatDetection::Supported(format) => {
                RuleEngine::check_size_bounds(size_bytes, min_bytes, max_bytes, &mut findings);
                Screening {
                    format: Some(format),
                    findings,
                }
            }
            FormatDetection::Unsupported { extension } => {
                engine.check_unsupported_format(extension.as_deref(), &mut findings);
                Screening {
                    format: None,
                    findings,
                }
            }
        }
    }

    /// Full validation: tier, issues, profile, loudness report
    pub async fn validate_audio_for_distribution(
        &self,
        buffer: &[u8],
        filename: &str,
        options: &ValidationOptions,
    ) -> AudioValidationResult {
        let limits = &self.config.limits;
        let size = buffer.len() as u64;
        let engine = RuleEngine::new(&self.config, options);

        let screening = self.screen(
            size,
            filename,
            limits.min_file_size_bytes,
            limits.max_file_size_bytes,
        );
        let too_large = screening.too_large();
        let Screening { format, mut findings } = screening;

        let Some(format) = format else {
            let result = build_result(findings, None, None, limits);
            info!(file = filename, tier = %result.quality_tier, "Unsupported format, rejected");
            return result;
        };

        let profile = match self.metadata.extract(buffer, &format) {
            MetadataExtraction::Parsed(profile) => {
                engine.check_profile(&profile, &mut findings);
                Some(profile)
            }
            MetadataExtraction::Failed(reason) => {
                engine.check_metadata_failure(&reason, &mut findings);
                None
            }
        };

        let loudness_report = if options.skip_loudness || too_large {
            debug!(
                file = filename,
                skip_requested = options.skip_loudness,
                too_large,
                "Loudness analysis skipped"
            );
            None
        } else {
            self.loudness.analyze(buffer, &format).await.into_report()
        };
        if let Some(report) = &loudness_report {
            engine.check_loudness(report, &mut findings);
        }

        let result = build_result(findings, profile, loudness_report, limits);
        info!(
            file = filename,
            format = %format.format,
            tier = %result.quality_tier,
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "Audio validation complete"
        );
        result
    }

    /// Cover-art validation (independent of any audio result)
    pub fn validate_cover_art(&self, buffer: &[u8], filename: &str) -> CoverArtValidationResult {
        self.cover_art.validate(buffer, filename)
    }

    /// Coarse legacy pre-check: supported extension, non-empty, within `max_size_mb`
    pub fn validate_audio_file(
        &self,
        buffer: &[u8],
        filename: &str,
        max_size_mb: u64,
    ) -> LegacyValidation {
        let screening = self.screen(
            buffer.len() as u64,
            filename,
            1,
            max_size_mb.saturating_mul(MIB),
        );

        let error = screening
            .findings
            .issues
            .first()
            .map(|issue| issue.message.clone());
        let format = screening.format;

        LegacyValidation {
            is_valid: error.is_none(),
            error,
            format: format.as_ref().map(|f| f.format.clone()),
            mime_type: format.map(|f| f.mime_type),
        }
    }
}
