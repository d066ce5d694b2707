use crate::ModelError;
use crate::matrix::DenseMatrix;
use crate::traits::DataSource;
use rand::Rng;
use rand::seq::SliceRandom;

/// A set of examples: one feature row per example and, for supervised training,
/// one label row per example.
///
/// # Fields
///
/// - `features` - `N x F` matrix of inputs
/// - `labels` - Optional `N x L` matrix of targets, row-aligned with `features`
///
/// `Clone` produces a deep copy; mutating one copy never affects the other.
///
/// # Example
/// ```rust
/// use rustymlp::dataset::Dataset;
/// use rustymlp::matrix::DenseMatrix;
///
/// let features = DenseMatrix::from_grid(&[[0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]);
/// let labels = DenseMatrix::from_grid(&[[1.0], [1.0], [0.0]]);
/// let dataset = Dataset::labeled(features, labels).unwrap();
///
/// let head = dataset.slice_rows(0, 2).unwrap();
/// assert_eq!(head.num_rows(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    features: DenseMatrix,
    labels: Option<DenseMatrix>,
}

impl Dataset {
    /// Creates a dataset, checking that features and labels have the same number of rows.
    ///
    /// # Parameters
    ///
    /// - `features` - Input matrix, one row per example
    /// - `labels` - Optional target matrix, one row per example
    ///
    /// # Returns
    ///
    /// - `Ok(Dataset)` - The new dataset
    /// - `Err(ModelError::ShapeMismatch)` - If the row counts differ
    pub fn new(features: DenseMatrix, labels: Option<DenseMatrix>) -> Result<Self, ModelError> {
        if let Some(labels) = &labels {
            if labels.num_rows() != features.num_rows() {
                return Err(ModelError::shape_mismatch(
                    "Dataset::new",
                    features.shape(),
                    labels.shape(),
                ));
            }
        }
        Ok(Self { features, labels })
    }

    /// Creates a dataset with labels.
    pub fn labeled(features: DenseMatrix, labels: DenseMatrix) -> Result<Self, ModelError> {
        Self::new(features, Some(labels))
    }

    /// Creates a dataset with no labels, for inference.
    pub fn unlabeled(features: DenseMatrix) -> Self {
        Self {
            features,
            labels: None,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.features.num_rows()
    }

    pub fn features(&self) -> &DenseMatrix {
        &self.features
    }

    pub fn labels(&self) -> Option<&DenseMatrix> {
        self.labels.as_ref()
    }

    pub fn has_labels(&self) -> bool {
        self.labels.is_some()
    }

    /// Returns the labels or fails when the dataset has none.
    ///
    /// # Returns
    ///
    /// - `Ok(&DenseMatrix)` - The label matrix
    /// - `Err(ModelError::InputValidationError)` - If the dataset is unlabeled
    pub fn require_labels(&self) -> Result<&DenseMatrix, ModelError> {
        self.labels.as_ref().ok_or_else(|| {
            ModelError::InputValidationError(
                "Supervised operation requires a labeled dataset".to_string(),
            )
        })
    }

    /// Returns a new dataset holding the same rows in a random order.
    ///
    /// Feature and label rows stay paired.
    pub fn shuffle_rows<R: Rng + ?Sized>(&self, rng: &mut R) -> Dataset {
        let mut indices: Vec<usize> = (0..self.num_rows()).collect();
        indices.shuffle(rng);
        self.select_rows(&indices)
    }

    /// Copies rows `start..end` (half-open) into a new dataset.
    ///
    /// # Returns
    ///
    /// - `Ok(Dataset)` - The selected rows
    /// - `Err(ModelError::InvalidRange)` - If `start > end` or `end > num_rows()`
    pub fn slice_rows(&self, start: usize, end: usize) -> Result<Dataset, ModelError> {
        let features = self.features.slice_rows(start, end)?;
        let labels = match &self.labels {
            Some(labels) => Some(labels.slice_rows(start, end)?),
            None => None,
        };
        Ok(Self { features, labels })
    }

    /// Copies the given rows, in order, into a new dataset.
    pub(crate) fn select_rows(&self, indices: &[usize]) -> Dataset {
        Self {
            features: self.features.select_rows(indices),
            labels: self.labels.as_ref().map(|labels| labels.select_rows(indices)),
        }
    }

    /// Returns a dataset with the same labels and new features.
    pub(crate) fn with_features(&self, features: DenseMatrix) -> Result<Dataset, ModelError> {
        Self::new(features, self.labels.clone())
    }
}

/// A `DataSource` over matrices that are already in memory.
///
/// Row counts are validated when the dataset is loaded, not when the source is built.
#[derive(Debug, Clone)]
pub struct InMemoryDataSource {
    features: DenseMatrix,
    labels: Option<DenseMatrix>,
}

impl InMemoryDataSource {
    pub fn new(features: DenseMatrix, labels: Option<DenseMatrix>) -> Self {
        Self { features, labels }
    }

    /// Builds a source from row vectors.
    ///
    /// # Returns
    ///
    /// - `Ok(InMemoryDataSource)` - The new source
    /// - `Err(ModelError::ShapeMismatch)` - If either grid is ragged
    pub fn from_rows(
        features: &[Vec<f64>],
        labels: Option<&[Vec<f64>]>,
    ) -> Result<Self, ModelError> {
        let features = DenseMatrix::from_rows(features)?;
        let labels = labels.map(DenseMatrix::from_rows).transpose()?;
        Ok(Self::new(features, labels))
    }
}

impl DataSource for InMemoryDataSource {
    fn load(&self) -> Result<Dataset, ModelError> {
        Dataset::new(self.features.clone(), self.labels.clone())
    }
}
