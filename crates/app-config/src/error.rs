// In crates/app-config/src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load application settings: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Failed to read run file {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse run file: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Run file lists pair `{0}` more than once")]
    DuplicatePair(String),

    #[error("Pair `{0}` has no strategies configured")]
    NoStrategies(String),
}

pub type Result<T> = std::result::Result<T, Error>;
