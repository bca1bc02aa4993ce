// In crates/core-types/src/error.rs

use thiserror::Error;

/// Failures raised while pulling indicator values from the host side.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read indicator source: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed indicator snapshot on line {line}: {reason}")]
    MalformedSnapshot { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
