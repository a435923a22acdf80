// src/manifest/mod.rs
pub mod classifier;
pub mod flat;
pub mod nested;
pub mod output;
pub mod sample_record;
pub mod tabular;
pub mod tumor_normal;
pub mod validate;
pub mod walk;

pub use classifier::{classify, Classification, ConditionPatterns};
pub use flat::{
    build_flat, flat_from_tsv, generate_samples_yaml, generate_samples_yaml_from_tsv,
    FlatManifest, SampleMap,
};
pub use nested::{build_nested, generate_nested_yaml, NestedSamples};
pub use output::{timestamped_name, write_yaml, OutputTarget};
pub use sample_record::{SampleRecord, UNKNOWN};
pub use tabular::{build_tsv, generate_samples_tsv, write_tsv};
pub use tumor_normal::{
    build_tn, discover_tn, generate_tumor_normal_yaml, PatientBamMap, SampleTree, StripMode,
    TumorNormalManifest, NORMAL, TUMOR,
};
pub use validate::{
    validate_flat, validate_flat_file, validate_tn, validate_tn_file, ValidationReport,
    ValidationWarning,
};
pub use walk::{list_sample_files, normalize_extension, WalkOrder};
