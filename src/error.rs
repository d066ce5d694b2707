use thiserror::Error;

/// Error types that can occur while building, running or training a network
///
/// # Variants
///
/// - `ShapeMismatch` - Two matrices (or a matrix and a dataset) do not have compatible dimensions for the requested operation
/// - `InvalidRange` - A row/column range falls outside the data, or split proportions cannot produce the requested subsets
/// - `ConfigurationError` - A network or trainer was configured with values it cannot work with
/// - `InputValidationError` - The input data provided does not meet the expected format or validation rules
/// - `NotEvaluated` - The halting strategy was asked for its best network before evaluating any network
/// - `AlreadyTrained` - A trainer was asked to train a second network; its halting and optimizer state belong to the first run
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error(
        "Shape mismatch in {operation}: left matrix is {} x {}, right matrix is {} x {}",
        .left.0,
        .left.1,
        .right.0,
        .right.1
    )]
    ShapeMismatch {
        operation: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
    #[error("Input validation error: {0}")]
    InputValidationError(String),
    #[error(
        "No network has been evaluated yet. The halting strategy must evaluate at least once before a best network exists."
    )]
    NotEvaluated,
    #[error("This trainer has already completed a training run. Build a new trainer for each network.")]
    AlreadyTrained,
}

impl ModelError {
    /// Builds a `ShapeMismatch` from the operation name and both `(rows, cols)` shapes.
    pub(crate) fn shape_mismatch(
        operation: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    ) -> Self {
        ModelError::ShapeMismatch {
            operation,
            left,
            right,
        }
    }
}
