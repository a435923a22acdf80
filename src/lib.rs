pub mod error;
pub mod manifest;

pub use error::{ManifestError, Result};
pub use manifest::{
    build_flat, build_nested, build_tn, build_tsv, classify, discover_tn, flat_from_tsv,
    list_sample_files, normalize_extension, timestamped_name, validate_flat, validate_flat_file,
    validate_tn, validate_tn_file, Classification, ConditionPatterns, FlatManifest,
    NestedSamples, OutputTarget, PatientBamMap, SampleMap, SampleRecord, SampleTree, StripMode,
    TumorNormalManifest, ValidationReport, ValidationWarning, WalkOrder, UNKNOWN,
};
