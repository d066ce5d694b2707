use crate::ModelError;
use crate::dataset::Dataset;
use crate::neural_network::batching::BatchedDataset;
use crate::neural_network::input_validation_function::validate_probability;
use crate::traits::BatchingStrategy;
use ndarray::{Array1, Axis};
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal};

/// Fixed-size batching with Gaussian noise augmentation.
///
/// Each iteration, every feature cell of the shuffled training set is independently
/// replaced, with probability `probability`, by a draw from a normal distribution
/// matching that feature's column in the reference set (mean and sample standard
/// deviation). Labels are never touched. The result is then batched like
/// `FixedSizeBatching`.
///
/// # Fields
///
/// - `batch_size` - Target rows per batch
/// - `probability` - Chance that any one feature cell is replaced
/// - `feature_distributions` - One normal distribution per feature column
#[derive(Debug, Clone)]
pub struct GaussianNoiseBatching {
    batch_size: usize,
    probability: f64,
    feature_distributions: Vec<Normal<f64>>,
}

impl GaussianNoiseBatching {
    /// Creates the strategy, measuring feature statistics on `reference_set`.
    ///
    /// Columns of a reference set with fewer than two rows get a standard deviation of 0,
    /// so every replacement equals the column mean.
    ///
    /// # Parameters
    ///
    /// - `batch_size` - Target rows per batch
    /// - `probability` - Chance of replacing each feature cell, in `[0, 1]`
    /// - `reference_set` - Dataset whose feature statistics drive the noise (usually the training set)
    ///
    /// # Returns
    ///
    /// - `Ok(Self)` - The strategy
    /// - `Err(ModelError::InputValidationError)` - If a parameter is out of range or a column's statistics are not finite
    pub fn new(batch_size: usize, probability: f64, reference_set: &Dataset) -> Result<Self, ModelError> {
        if batch_size == 0 {
            return Err(ModelError::InputValidationError(
                "batch_size must be at least 1".to_string(),
            ));
        }
        validate_probability(probability, "probability")?;

        let features = reference_set.features().as_array();
        let (num_rows, num_cols) = features.dim();
        let means = features
            .mean_axis(Axis(0))
            .unwrap_or_else(|| Array1::zeros(num_cols));
        let std_devs = if num_rows < 2 {
            Array1::zeros(num_cols)
        } else {
            features.std_axis(Axis(0), 1.0)
        };
        let feature_distributions = means
            .iter()
            .zip(std_devs.iter())
            .enumerate()
            .map(|(col, (&mean, &std_dev))| {
                Normal::new(mean, std_dev).map_err(|e| {
                    ModelError::InputValidationError(format!(
                        "Feature column {} of {} rows has no usable distribution: {}",
                        col, num_rows, e
                    ))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            batch_size,
            probability,
            feature_distributions,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Per-column noise distributions, in feature order.
    pub fn feature_distributions(&self) -> &[Normal<f64>] {
        &self.feature_distributions
    }

    /// Returns a copy of `dataset` with noise injected into its features.
    fn add_noise(&self, dataset: &Dataset, rng: &mut dyn RngCore) -> Result<Dataset, ModelError> {
        let mut features = dataset.features().clone();
        if features.num_cols() != self.feature_distributions.len() {
            return Err(ModelError::shape_mismatch(
                "GaussianNoiseBatching",
                (features.num_rows(), self.feature_distributions.len()),
                features.shape(),
            ));
        }

        for row in 0..features.num_rows() {
            for (col, distribution) in self.feature_distributions.iter().enumerate() {
                if rng.random::<f64>() < self.probability {
                    features.set(row, col, distribution.sample(rng));
                }
            }
        }
        dataset.with_features(features)
    }
}

impl BatchingStrategy for GaussianNoiseBatching {
    fn batched_dataset(
        &mut self,
        dataset: &Dataset,
        rng: &mut dyn RngCore,
    ) -> Result<BatchedDataset, ModelError> {
        let shuffled = dataset.shuffle_rows(rng);
        let noisy = self.add_noise(&shuffled, rng)?;
        BatchedDataset::new(&noisy, self.batch_size, rng)
    }
}
