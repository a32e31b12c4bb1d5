//! Extraction layer
//!
//! Everything that turns the raw upload into facts the rule engine can judge:
//! - `format_detector`: filename extension → container/codec family
//! - `metadata_extractor`: container properties via the `MetadataSource` port
//! - `loudness_analyzer`: integrated loudness and true peak via the `LoudnessMeasurer` port

pub mod format_detector;
pub mod loudness_analyzer;
pub mod metadata_extractor;

pub use format_detector::{file_extension, FormatDetection, FormatDetector};
pub use loudness_analyzer::{
    build_report, parse_loudnorm_output, FfmpegLoudnessMeasurer, LoudnessAnalyzer, LoudnessError,
    LoudnessMeasurement, LoudnessMeasurer, LoudnessOutcome,
};
pub use metadata_extractor::{
    LoftyMetadataSource, MetadataError, MetadataExtraction, MetadataExtractor, MetadataSource,
    ParsedAudio,
};
