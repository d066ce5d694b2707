use crate::ModelError;
use crate::matrix::DenseMatrix;
use crate::traits::WeightInitializer;
use rand::{Rng, RngCore};

/// Range used when a network is configured without one.
pub const DEFAULT_WEIGHT_RANGE: (f64, f64) = (-0.04, 0.04);

/// Draws every weight independently from the uniform distribution `[min, max)`.
///
/// # Fields
///
/// - `min` - Inclusive lower bound
/// - `max` - Exclusive upper bound
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformWeightInitializer {
    min: f64,
    max: f64,
}

impl UniformWeightInitializer {
    /// Creates a uniform initializer over `[min, max)`.
    ///
    /// # Returns
    ///
    /// - `Ok(Self)` - The initializer
    /// - `Err(ModelError::ConfigurationError)` - If `min >= max` or a bound is not finite
    pub fn new(min: f64, max: f64) -> Result<Self, ModelError> {
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(ModelError::ConfigurationError(format!(
                "Weight range must satisfy min < max with finite bounds, got [{}, {})",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}

impl Default for UniformWeightInitializer {
    fn default() -> Self {
        Self {
            min: DEFAULT_WEIGHT_RANGE.0,
            max: DEFAULT_WEIGHT_RANGE.1,
        }
    }
}

impl WeightInitializer for UniformWeightInitializer {
    fn initialize(&self, weights: &mut DenseMatrix, rng: &mut dyn RngCore) {
        let (min, max) = (self.min, self.max);
        weights.fill_with(|| rng.random_range(min..max));
    }
}

/// Sets every weight to the same value. Mostly useful for fixtures with known outputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantWeightInitializer(pub f64);

impl WeightInitializer for ConstantWeightInitializer {
    fn initialize(&self, weights: &mut DenseMatrix, _rng: &mut dyn RngCore) {
        let value = self.0;
        weights.fill_with(|| value);
    }
}
