use crate::ModelError;
use crate::matrix::DenseMatrix;
use crate::neural_network::input_validation_function::validate_learning_rate;
use crate::traits::OptimizationStrategy;
use rayon::prelude::*;

/// Plain gradient descent: every correction is the gradient scaled by a constant
/// learning rate.
///
/// # Fields
///
/// * `learning_rate` - Step size applied to every gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLearningRate {
    learning_rate: f64,
}

impl FixedLearningRate {
    /// Creates a new fixed learning rate optimizer.
    ///
    /// # Parameters
    ///
    /// * `learning_rate` - Step size for weight updates
    ///
    /// # Returns
    ///
    /// - `Ok(Self)` - A new optimizer instance
    /// - `Err(ModelError::InputValidationError)` - If the learning rate is not positive and finite
    pub fn new(learning_rate: f64) -> Result<Self, ModelError> {
        validate_learning_rate(learning_rate)?;
        Ok(Self { learning_rate })
    }
}

impl OptimizationStrategy for FixedLearningRate {
    fn calc_corrections(&mut self, gradients: &[DenseMatrix]) -> Result<Vec<DenseMatrix>, ModelError> {
        Ok(gradients
            .par_iter()
            .map(|gradient| gradient.scale(self.learning_rate))
            .collect())
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }
}
