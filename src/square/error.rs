//! Error types for the word square solver.

use std::path::PathBuf;

use thiserror::Error;

use super::builder::StopReason;

/// The error type for every fallible operation in this crate.
///
/// Finding no square is not an error; it is reported as an empty result.
#[derive(Debug, Error)]
pub enum WordSquareError {
    /// The letter sequence was empty or contained something other than letters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No dictionary word has the requested length.
    #[error("Dictionary has no words of length {size}")]
    DictionaryUnavailable { size: usize },

    /// The search stopped on a limit before it could finish.
    #[error("Search stopped before completion: {reason}")]
    Interrupted { reason: StopReason },

    /// A dictionary or config file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The candidate prefix index could not be built.
    #[error("Failed to build prefix index: {0}")]
    Index(#[from] fst::Error),

    /// The config file is not valid JSON for a solver config.
    #[error("Invalid config: {0}")]
    Config(#[from] serde_json::Error),
}

/// A convenience `Result` type alias using [`WordSquareError`].
pub type Result<T> = std::result::Result<T, WordSquareError>;
