use crate::ModelError;
use crate::dataset::Dataset;

/// Splits a dataset into ordered, non-overlapping subsets (for example training,
/// validation and test sets).
///
/// Rows are taken in their current order; shuffle the dataset first if the source
/// order is meaningful.
#[derive(Debug, Clone, Copy, Default)]
pub struct DataSetSplitter;

impl DataSetSplitter {
    pub fn new() -> Self {
        Self
    }

    /// Splits `dataset` into one subset per proportion.
    ///
    /// Subset `i` holds `round(proportions[i] * N)` rows, starting where subset `i - 1`
    /// ended. A subset that would run past the end of the data is truncated at `N`,
    /// so rounding never fails a split whose proportions sum to 1.
    ///
    /// # Parameters
    ///
    /// - `dataset` - The rows to split
    /// - `proportions` - Fraction of `N` for each subset, in output order
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Dataset>)` - One dataset per proportion
    /// - `Err(ModelError::InputValidationError)` - If a proportion is negative or not finite
    /// - `Err(ModelError::InvalidRange)` - If every row is used up before a subset starts
    ///
    /// # Example
    /// ```rust
    /// use rustymlp::dataset::Dataset;
    /// use rustymlp::matrix::DenseMatrix;
    /// use rustymlp::utility::DataSetSplitter;
    ///
    /// let features = DenseMatrix::from_column(&[1.0, 2.0, 3.0, 4.0, 5.0]);
    /// let dataset = Dataset::unlabeled(features);
    ///
    /// let subsets = DataSetSplitter::new().split(&dataset, &[0.2, 0.4, 0.4]).unwrap();
    /// let sizes: Vec<usize> = subsets.iter().map(|s| s.num_rows()).collect();
    /// assert_eq!(sizes, vec![1, 2, 2]);
    /// ```
    pub fn split(&self, dataset: &Dataset, proportions: &[f64]) -> Result<Vec<Dataset>, ModelError> {
        if let Some(bad) = proportions.iter().find(|p| !(p.is_finite() && **p >= 0.0)) {
            return Err(ModelError::InputValidationError(format!(
                "Split proportions must be non-negative and finite, got {}",
                bad
            )));
        }

        let num_rows = dataset.num_rows();
        let mut subsets = Vec::with_capacity(proportions.len());
        let mut previous_end = 0;

        for proportion in proportions {
            if previous_end >= num_rows {
                return Err(ModelError::InvalidRange(format!(
                    "Dataset of {} rows is exhausted before subset {}: proportions sum to > 1.0",
                    num_rows,
                    subsets.len()
                )));
            }
            let subset_rows = (proportion * num_rows as f64).round() as usize;
            let end = (previous_end + subset_rows).min(num_rows);
            subsets.push(dataset.slice_rows(previous_end, end)?);
            previous_end = end;
        }

        Ok(subsets)
    }
}
