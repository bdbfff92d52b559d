//! Error types for configuration loading.
//!
//! The engine itself has no fatal errors; only reading a configuration file
//! can fail.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}
