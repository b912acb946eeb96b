//! Error types for the rule combiner.

use std::path::PathBuf;

/// Errors that can occur while combining rule files.
#[derive(Debug, thiserror::Error)]
pub enum CombineError {
    /// Filesystem I/O error (unreadable directory, unwritable output, ...).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A rule file is not valid YAML.
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A rule file parsed but does not have the expected shape.
    #[error("schema error in {path}: {detail}")]
    Schema { path: PathBuf, detail: String },

    /// The combined document contains a shape the block emitter
    /// cannot represent (tagged values, complex mapping keys).
    #[error("YAML serialize error: {0}")]
    Serialize(String),
}

/// Result alias for combiner operations.
pub type Result<T> = std::result::Result<T, CombineError>;
