use crate::ModelError;
use crate::dataset::Dataset;
use crate::neural_network::batching::BatchedDataset;
use crate::traits::BatchingStrategy;
use rand::RngCore;

/// Mini-batches of (roughly) `batch_size` rows, reshuffled every iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSizeBatching {
    batch_size: usize,
}

impl FixedSizeBatching {
    /// # Returns
    ///
    /// - `Ok(Self)` - The strategy
    /// - `Err(ModelError::InputValidationError)` - If `batch_size` is zero
    pub fn new(batch_size: usize) -> Result<Self, ModelError> {
        if batch_size == 0 {
            return Err(ModelError::InputValidationError(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(Self { batch_size })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }
}

impl BatchingStrategy for FixedSizeBatching {
    fn batched_dataset(
        &mut self,
        dataset: &Dataset,
        rng: &mut dyn RngCore,
    ) -> Result<BatchedDataset, ModelError> {
        BatchedDataset::new(dataset, self.batch_size, rng)
    }
}

/// Full-batch gradient descent: one batch holding the whole (shuffled) training set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FullBatching;

impl FullBatching {
    pub fn new() -> Self {
        Self
    }
}

impl BatchingStrategy for FullBatching {
    fn batched_dataset(
        &mut self,
        dataset: &Dataset,
        rng: &mut dyn RngCore,
    ) -> Result<BatchedDataset, ModelError> {
        BatchedDataset::new(dataset, dataset.num_rows().max(1), rng)
    }
}
