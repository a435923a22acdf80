use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building, writing or loading manifests.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The search root is missing or is not a directory.
    #[error("{reason}: {}", path.display())]
    NotFound { path: PathBuf, reason: &'static str },

    /// The walk finished without a single file carrying the extension.
    #[error("No files with extension '{extension}' found in {}", directory.display())]
    NoMatches { extension: String, directory: PathBuf },

    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid option value, e.g. a malformed condition argument.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A loaded manifest does not have the expected shape.
    #[error("Malformed manifest: {0}")]
    Structure(String),
}

impl ManifestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ManifestError>;
