use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read provinces file {path}: {source}")]
    ProvincesFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse provinces file: {0}")]
    ProvincesFileParse(#[from] serde_yaml::Error),

    #[error("province catalog validation failed: {0}")]
    Validation(String),
}

/// Failures while reading the static store dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
}
