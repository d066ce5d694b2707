use crate::ModelError;
use crate::matrix::DenseMatrix;
use crate::neural_network::input_validation_function::{
    validate_decay_rate, validate_learning_rate,
};
use crate::traits::OptimizationStrategy;
use rayon::prelude::*;

/// Gradient descent with momentum.
///
/// Each correction is `learning_rate * gradient + momentum * previous_correction`. The
/// previous corrections start out absent (equivalent to zero) and are replaced by the
/// returned corrections after every call, so the optimizer carries state from batch to
/// batch. It does not implement `Clone`; one instance belongs to one trainer.
///
/// # Fields
///
/// - `learning_rate` - Step size applied to the current gradient
/// - `momentum` - Fraction of the previous correction carried into the next one
/// - `previous_corrections` - Corrections returned by the last call, if any
///
/// # Example
/// ```rust
/// use rustymlp::matrix::DenseMatrix;
/// use rustymlp::neural_network::Momentum;
/// use rustymlp::traits::OptimizationStrategy;
///
/// let mut optimizer = Momentum::new(0.1, 0.5).unwrap();
/// let gradient = DenseMatrix::from_grid(&[[0.1, -0.2], [0.2, -0.1]]);
///
/// optimizer.calc_corrections(&[gradient.clone()]).unwrap();
/// let second = optimizer.calc_corrections(&[gradient]).unwrap();
/// assert!((second[0].get(0, 0) - 0.015).abs() < 1e-12);
/// ```
#[derive(Debug)]
pub struct Momentum {
    learning_rate: f64,
    momentum: f64,
    previous_corrections: Option<Vec<DenseMatrix>>,
}

impl Momentum {
    /// Creates a new momentum optimizer with no history.
    ///
    /// # Parameters
    ///
    /// - `learning_rate` - Step size for weight updates
    /// - `momentum` - Momentum factor, in `[0, 1)`
    ///
    /// # Returns
    ///
    /// - `Ok(Self)` - A new optimizer instance
    /// - `Err(ModelError::InputValidationError)` - If a parameter is out of range
    pub fn new(learning_rate: f64, momentum: f64) -> Result<Self, ModelError> {
        validate_learning_rate(learning_rate)?;
        validate_decay_rate(momentum, "momentum")?;
        Ok(Self {
            learning_rate,
            momentum,
            previous_corrections: None,
        })
    }

    pub fn momentum(&self) -> f64 {
        self.momentum
    }
}

impl OptimizationStrategy for Momentum {
    fn calc_corrections(&mut self, gradients: &[DenseMatrix]) -> Result<Vec<DenseMatrix>, ModelError> {
        let mut corrections: Vec<DenseMatrix> = gradients
            .par_iter()
            .map(|gradient| gradient.scale(self.learning_rate))
            .collect();

        if let Some(previous) = &self.previous_corrections {
            if previous.len() != corrections.len() {
                return Err(ModelError::InputValidationError(format!(
                    "Momentum history holds {} layers but {} gradients were given",
                    previous.len(),
                    corrections.len()
                )));
            }
            for (correction, previous) in corrections.iter_mut().zip(previous) {
                correction.plus_in_place(&previous.scale(self.momentum))?;
            }
        }

        self.previous_corrections = Some(corrections.clone());
        Ok(corrections)
    }

    fn learning_rate(&self) -> f64 {
        self.learning_rate
    }
}
