use std::fmt;

/// The result type used by every routine in this crate.
pub type Result<T> = std::result::Result<T, LogisticError>;

/// Usage errors surfaced by the prediction and objective routines.
///
/// None of these are recoverable below the caller: they all mean the inputs
/// did not satisfy the shape or domain contract.
#[derive(Debug, Clone, PartialEq)]
pub enum LogisticError {
    /// An array did not have the length implied by another argument.
    ShapeMismatch {
        /// Which argument was wrong (e.g. "weights", "targets").
        what: &'static str,
        got: usize,
        expected: usize,
    },

    /// A logarithm of a non-positive value, or an average over nothing.
    Domain(&'static str),

    /// Regularization was requested but `weight_decay` was not given.
    MissingHyperparameter(&'static str),

    /// A hyperparameter was given but is outside its domain.
    InvalidHyperparameter { name: &'static str, value: f64 },
}

impl fmt::Display for LogisticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogisticError::ShapeMismatch { what, got, expected } => {
                write!(f, "shape mismatch for {}: got {}, expected {}", what, got, expected)
            }
            LogisticError::Domain(msg) => write!(f, "domain error: {}", msg),
            LogisticError::MissingHyperparameter(name) => {
                write!(f, "missing hyperparameter `{}`", name)
            }
            LogisticError::InvalidHyperparameter { name, value } => {
                write!(f, "invalid value {} for hyperparameter `{}`", value, name)
            }
        }
    }
}

impl std::error::Error for LogisticError {}
