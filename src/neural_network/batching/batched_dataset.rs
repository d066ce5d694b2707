use crate::ModelError;
use crate::dataset::Dataset;
use rand::RngCore;

/// The mini-batches of one training iteration, consumed once in order.
///
/// Built from a shuffled copy of a dataset. The number of batches is
/// `max(1, round(N / instances_per_batch))` for a non-empty dataset and `0` for an empty
/// one. Rows are dealt out sequentially so that every row lands in exactly one batch and
/// batch sizes differ by at most one; the first `N % num_batches` batches carry the extra
/// row.
///
/// # Example
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use rustymlp::dataset::Dataset;
/// use rustymlp::matrix::DenseMatrix;
/// use rustymlp::neural_network::BatchedDataset;
///
/// let values: Vec<f64> = (0..28).map(f64::from).collect();
/// let dataset = Dataset::unlabeled(DenseMatrix::from_column(&values));
/// let mut rng = StdRng::seed_from_u64(1);
///
/// let batches = BatchedDataset::new(&dataset, 8, &mut rng).unwrap();
/// assert_eq!(batches.size(), 4);
/// let sizes: Vec<usize> = batches.map(|batch| batch.num_rows()).collect();
/// assert_eq!(sizes, vec![7, 7, 7, 7]);
/// ```
#[derive(Debug)]
pub struct BatchedDataset {
    batches: std::vec::IntoIter<Dataset>,
    size: usize,
}

impl BatchedDataset {
    /// Shuffles `dataset` and splits it into batches of roughly `instances_per_batch` rows.
    ///
    /// # Parameters
    ///
    /// - `dataset` - The rows to batch; it is not modified
    /// - `instances_per_batch` - Target number of rows per batch
    /// - `rng` - Source of randomness for the shuffle
    ///
    /// # Returns
    ///
    /// - `Ok(BatchedDataset)` - The batches
    /// - `Err(ModelError::InputValidationError)` - If `instances_per_batch` is zero
    pub fn new(
        dataset: &Dataset,
        instances_per_batch: usize,
        rng: &mut dyn RngCore,
    ) -> Result<Self, ModelError> {
        if instances_per_batch == 0 {
            return Err(ModelError::InputValidationError(
                "instances_per_batch must be at least 1".to_string(),
            ));
        }

        let shuffled = dataset.shuffle_rows(rng);
        let num_rows = shuffled.num_rows();
        let num_batches = if num_rows == 0 {
            0
        } else {
            ((num_rows as f64 / instances_per_batch as f64).round() as usize).max(1)
        };

        let mut batches = Vec::with_capacity(num_batches);
        let mut start = 0;
        for index in 0..num_batches {
            let mut rows_in_batch = num_rows / num_batches;
            if index < num_rows % num_batches {
                rows_in_batch += 1;
            }
            batches.push(shuffled.slice_rows(start, start + rows_in_batch)?);
            start += rows_in_batch;
        }

        Ok(Self::from_batches(batches))
    }

    /// Wraps batches that were produced elsewhere.
    pub fn from_batches(batches: Vec<Dataset>) -> Self {
        let size = batches.len();
        Self {
            batches: batches.into_iter(),
            size,
        }
    }

    /// Total number of batches, including those already consumed.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Iterator for BatchedDataset {
    type Item = Dataset;

    fn next(&mut self) -> Option<Dataset> {
        self.batches.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.batches.size_hint()
    }
}

impl ExactSizeIterator for BatchedDataset {}
