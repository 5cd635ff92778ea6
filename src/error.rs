//! Error types for massing.
//!
//! The kernel is permissive: most malformed geometry degrades to NaN or
//! misshapen output instead of failing. Errors are only raised where an
//! explicit check exists, such as per-face parameter counts or face degree.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur during mesh operations.
#[derive(Error, Debug)]
pub enum MeshError {
    /// The mesh has no faces.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A per-face (or per-vertex) parameter list has the wrong length.
    #[error("{name}: expected {expected} values, got {actual}")]
    ArgumentCountMismatch {
        /// Name of the offending argument.
        name: &'static str,
        /// Number of values required (usually the face count).
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },

    /// An operation received a face with a vertex count it cannot handle.
    #[error("{operation}: face has to be quad or triangle, got {degree} vertices")]
    InvalidFaceDegree {
        /// The operation that rejected the face.
        operation: &'static str,
        /// Number of vertices in the face.
        degree: usize,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading mesh from file.
    #[error("failed to load mesh from {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving mesh to file.
    #[error("failed to save mesh to {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Unsupported file format.
    #[error("unsupported file format: {extension}")]
    UnsupportedFormat {
        /// The file extension.
        extension: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Fail with [`MeshError::ArgumentCountMismatch`] unless `actual == expected`.
    pub fn check_count(name: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(MeshError::ArgumentCountMismatch {
                name,
                expected,
                actual,
            })
        }
    }
}
