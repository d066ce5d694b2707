use crate::ModelError;
use crate::matrix::DenseMatrix;
use crate::neural_network::input_validation_function::validate_non_negative_finite;
use crate::traits::RegularizationStrategy;

/// L2 (weight decay) regularization.
///
/// Before each correction is subtracted, every weight (bias rows included) is scaled by
/// `1 - learning_rate * lambda / m`, where `m` is the number of examples in the batch.
///
/// # Fields
///
/// * `lambda` - Regularization strength, non-negative
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct L2Regularization {
    lambda: f64,
}

impl L2Regularization {
    /// Creates a new L2 regularization strategy.
    ///
    /// # Returns
    ///
    /// - `Ok(Self)` - The strategy
    /// - `Err(ModelError::InputValidationError)` - If `lambda` is negative or not finite
    pub fn new(lambda: f64) -> Result<Self, ModelError> {
        validate_non_negative_finite(lambda, "lambda")?;
        Ok(Self { lambda })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }
}

impl RegularizationStrategy for L2Regularization {
    fn adjust_weights(&self, weights: &mut DenseMatrix, num_examples: usize, learning_rate: f64) {
        if num_examples == 0 {
            return;
        }
        let shrink = 1.0 - learning_rate * self.lambda / num_examples as f64;
        weights.scale_in_place(shrink);
    }
}
