//! Error types for repograph-core.
//!
//! Every variant names the file it concerns so a failed run can be traced
//! back to the offending input without re-running with extra logging.

use std::path::PathBuf;
use thiserror::Error;

use crate::owner::OwnerError;

/// Result type alias for repograph-core operations.
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors that can occur while discovering, extracting or writing graph data.
#[derive(Error, Debug)]
pub enum GraphError {
    /// The input path exists but is not a directory.
    #[error("Input path is not a directory: {}", path.display())]
    NotADirectory {
        /// Path that was given as the input directory.
        path: PathBuf,
    },

    /// Walking the input directory failed.
    #[error("Failed to scan {}: {message}", path.display())]
    Scan {
        /// Directory being scanned.
        path: PathBuf,
        /// Description of the walker error.
        message: String,
    },

    /// A source file could not be opened or parsed as CSV.
    #[error("Failed to read {}: {source}", path.display())]
    InputRead {
        /// Source file.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A source file lacks one of the required columns.
    #[error("In {} file: missing required column `{column}`", path.display())]
    MissingColumn {
        /// Source file.
        path: PathBuf,
        /// Name of the missing column.
        column: &'static str,
    },

    /// A required cell is empty.
    #[error("In {} file: empty `{column}` value on line {line}", path.display())]
    EmptyValue {
        /// Source file.
        path: PathBuf,
        /// Column holding the empty cell.
        column: &'static str,
        /// 1-based line number in the source file.
        line: u64,
    },

    /// A `repo_name` value cannot be split into owner and name.
    ///
    /// Deliberately does not carry the offending value, only the rule.
    #[error("In {} file: {reason}", path.display())]
    SchemaViolation {
        /// Source file.
        path: PathBuf,
        /// Which ownership rule was violated.
        reason: OwnerError,
    },

    /// Filesystem error while preparing or persisting output.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Serializing an output table failed.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        /// Output table being written.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
}

impl GraphError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GraphError::Io {
            path: path.into(),
            source,
        }
    }
}
