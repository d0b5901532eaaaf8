//! Error types for modulation spectrum and frame operations.

use numr::dtype::DType;
use std::fmt;

/// Result type for modulation spectrum and frame operations.
pub type ModSpecResult<T> = Result<T, ModSpecError>;

/// Errors that can occur while transforming or aligning sequences.
#[derive(Debug, Clone)]
pub enum ModSpecError {
    /// Tensor rank or dimensions do not match what the operation requires.
    ShapeError {
        expected: String,
        got: Vec<usize>,
        context: String,
    },

    /// Invalid parameter value (e.g. a zero DFT length).
    InvalidArgument { arg: &'static str, reason: String },

    /// Backward requested without a matching forward evaluation.
    StateError { context: String },

    /// Element type not supported by the operation.
    UnsupportedDType { dtype: DType, op: &'static str },

    /// Error from underlying numr operation.
    NumrError(String),
}

impl ModSpecError {
    pub(crate) fn shape(expected: &[usize], got: &[usize], context: impl Into<String>) -> Self {
        Self::ShapeError {
            expected: format!("{:?}", expected),
            got: got.to_vec(),
            context: context.into(),
        }
    }

    pub(crate) fn rank2(got: &[usize], context: impl Into<String>) -> Self {
        Self::ShapeError {
            expected: "rank-2 [T, D]".to_string(),
            got: got.to_vec(),
            context: context.into(),
        }
    }
}

impl fmt::Display for ModSpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeError {
                expected,
                got,
                context,
            } => {
                write!(
                    f,
                    "Shape mismatch in {}: expected {}, got {:?}",
                    context, expected, got
                )
            }
            Self::InvalidArgument { arg, reason } => {
                write!(f, "Invalid argument '{}': {}", arg, reason)
            }
            Self::StateError { context } => {
                write!(f, "State error: {}", context)
            }
            Self::UnsupportedDType { dtype, op } => {
                write!(f, "Unsupported dtype {:?} for {}", dtype, op)
            }
            Self::NumrError(msg) => {
                write!(f, "numr error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ModSpecError {}

impl From<numr::error::Error> for ModSpecError {
    fn from(err: numr::error::Error) -> Self {
        Self::NumrError(err.to_string())
    }
}
