use crate::ModelError;
use crate::dataset::Dataset;
use crate::matrix::DenseMatrix;
use crate::neural_network::NeuralNetwork;
use crate::traits::PerformanceEvaluator;

/// Fraction of rows where the predicted 0/1 row differs from the label row.
fn fraction_wrong(answers: &DenseMatrix, labels: &DenseMatrix) -> Result<f64, ModelError> {
    if answers.shape() != labels.shape() {
        return Err(ModelError::shape_mismatch(
            "performance evaluation",
            answers.shape(),
            labels.shape(),
        ));
    }
    if answers.num_rows() == 0 {
        return Err(ModelError::InputValidationError(
            "Cannot evaluate performance on an empty dataset".to_string(),
        ));
    }

    let num_wrong = answers
        .as_array()
        .outer_iter()
        .zip(labels.as_array().outer_iter())
        .filter(|(answer, label)| answer != label)
        .count();

    Ok(num_wrong as f64 / answers.num_rows() as f64)
}

/// Scores multi-class classifiers with one-hot labels.
///
/// Each output row is converted to a one-hot row with a 1 at its largest value (the first
/// one on ties); the error is the fraction of rows whose one-hot answer differs from the
/// label row.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use rustymlp::dataset::Dataset;
/// use rustymlp::matrix::DenseMatrix;
/// use rustymlp::metric::ClassificationPerformanceEvaluator;
/// use rustymlp::neural_network::{Activation, NeuralNetwork};
/// use rustymlp::traits::PerformanceEvaluator;
///
/// // A single identity layer with zero bias passes the inputs straight through
/// let weights = DenseMatrix::from_grid(&[[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]]);
/// let network = NeuralNetwork::from_layers(
///     vec![weights],
///     Arc::new(Activation::Identity),
///     Arc::new(Activation::Identity),
/// ).unwrap();
///
/// let features = DenseMatrix::from_grid(&[[0.9, 0.1], [0.2, 0.8]]);
/// let labels = DenseMatrix::from_grid(&[[1.0, 0.0], [1.0, 0.0]]);
/// let dataset = Dataset::labeled(features, labels).unwrap();
///
/// let error = ClassificationPerformanceEvaluator.error(&network, &dataset).unwrap();
/// assert_eq!(error, 0.5);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassificationPerformanceEvaluator;

impl ClassificationPerformanceEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Converts each row into a one-hot row marking its (first) largest value.
    pub fn one_hot_answers(output: &DenseMatrix) -> DenseMatrix {
        let mut answers = DenseMatrix::zeros(output.num_rows(), output.num_cols());
        for (row_index, row) in output.as_array().outer_iter().enumerate() {
            let mut best_col = None;
            let mut best_value = f64::NEG_INFINITY;
            for (col, &value) in row.iter().enumerate() {
                if best_col.is_none() || value > best_value {
                    best_value = value;
                    best_col = Some(col);
                }
            }
            if let Some(col) = best_col {
                answers.set(row_index, col, 1.0);
            }
        }
        answers
    }
}

impl PerformanceEvaluator for ClassificationPerformanceEvaluator {
    fn error(&self, network: &NeuralNetwork, dataset: &Dataset) -> Result<f64, ModelError> {
        let labels = dataset.require_labels()?;
        let output = network.analyze_dataset(dataset)?;
        fraction_wrong(&Self::one_hot_answers(&output), labels)
    }
}

/// Scores networks whose outputs are independent binary decisions.
///
/// Every output value at or above `threshold` counts as 1, everything else as 0; the
/// error is the fraction of rows that differ from the label row in any column.
///
/// # Fields
///
/// * `threshold` - Decision boundary between 0 and 1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdPerformanceEvaluator {
    threshold: f64,
}

impl ThresholdPerformanceEvaluator {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl PerformanceEvaluator for ThresholdPerformanceEvaluator {
    fn error(&self, network: &NeuralNetwork, dataset: &Dataset) -> Result<f64, ModelError> {
        let labels = dataset.require_labels()?;
        let threshold = self.threshold;
        let answers = network
            .analyze_dataset(dataset)?
            .apply(move |x| if x >= threshold { 1.0 } else { 0.0 });
        fraction_wrong(&answers, labels)
    }
}
