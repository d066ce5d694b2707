use crate::ModelError;
use crate::dataset::Dataset;
use crate::metric::{TRAINING_SET_PERCENT_WRONG, VALIDATION_SET_PERCENT_WRONG};
use crate::neural_network::NeuralNetwork;
use crate::traits::{HaltingStrategy, PerformanceEvaluator, PerformanceListener};
use std::collections::BTreeMap;
use tracing::debug;

/// Early stopping on a held-out validation set.
///
/// Every evaluation scores the network on both the training and the validation set and
/// reports both errors to the registered listeners. When the validation error strictly
/// improves on the best so far, a deep copy of the network is kept and the counter of
/// evaluations since the best is reset; the counter is then incremented for the current
/// evaluation. Training halts once the best validation error reaches 0 or the counter
/// exceeds `patience`.
///
/// With `patience = 2`, validation errors `0.6, 0.5, 0.55, 0.55` halt after the fourth
/// evaluation and keep the network from the second.
///
/// # Fields
///
/// - `training_set` - Labeled training examples, scored for reporting only
/// - `validation_set` - Labeled held-out examples that drive halting
/// - `evaluator` - Scores a network on a dataset
/// - `patience` - Evaluations without improvement tolerated before halting
/// - `listeners` - Receivers of the per-evaluation metrics
/// - `best` - Deep copy of the best network so far
/// - `best_error` - Validation error of `best`
/// - `iterations_since_best` - Evaluations since, and including, the one that produced `best`
pub struct ValidationSetHaltingStrategy {
    training_set: Dataset,
    validation_set: Dataset,
    evaluator: Box<dyn PerformanceEvaluator>,
    patience: usize,
    listeners: Vec<Box<dyn PerformanceListener>>,
    best: Option<NeuralNetwork>,
    best_error: f64,
    iterations_since_best: usize,
}

impl ValidationSetHaltingStrategy {
    /// Creates a halting strategy with no listeners.
    ///
    /// # Parameters
    ///
    /// - `training_set` - Labeled training examples
    /// - `validation_set` - Labeled validation examples
    /// - `evaluator` - How networks are scored
    /// - `patience` - Evaluations without improvement tolerated before halting
    ///
    /// # Returns
    ///
    /// - `Ok(Self)` - The strategy
    /// - `Err(ModelError::InputValidationError)` - If either dataset is unlabeled
    pub fn new(
        training_set: Dataset,
        validation_set: Dataset,
        evaluator: Box<dyn PerformanceEvaluator>,
        patience: usize,
    ) -> Result<Self, ModelError> {
        training_set.require_labels()?;
        validation_set.require_labels()?;
        Ok(Self {
            training_set,
            validation_set,
            evaluator,
            patience,
            listeners: Vec::new(),
            best: None,
            best_error: f64::MAX,
            iterations_since_best: 0,
        })
    }

    /// Registers a listener that receives the training and validation errors after every evaluation.
    pub fn add_listener(&mut self, listener: Box<dyn PerformanceListener>) {
        self.listeners.push(listener);
    }

    /// Builder-style variant of `add_listener`.
    pub fn with_listener(mut self, listener: Box<dyn PerformanceListener>) -> Self {
        self.add_listener(listener);
        self
    }

    pub fn best_error(&self) -> f64 {
        self.best_error
    }

    pub fn iterations_since_best(&self) -> usize {
        self.iterations_since_best
    }

    pub fn patience(&self) -> usize {
        self.patience
    }

    fn report_performance(&mut self, training_error: f64, validation_error: f64) {
        if self.listeners.is_empty() {
            return;
        }
        let mut metrics = BTreeMap::new();
        metrics.insert(TRAINING_SET_PERCENT_WRONG.to_string(), training_error);
        metrics.insert(VALIDATION_SET_PERCENT_WRONG.to_string(), validation_error);
        for listener in self.listeners.iter_mut() {
            listener.performance_event(&metrics);
        }
    }
}

impl HaltingStrategy for ValidationSetHaltingStrategy {
    fn should_halt(&self) -> bool {
        self.best_error == 0.0 || self.iterations_since_best > self.patience
    }

    fn evaluate(&mut self, network: &NeuralNetwork) -> Result<f64, ModelError> {
        let training_error = self.evaluator.error(network, &self.training_set)?;
        let validation_error = self.evaluator.error(network, &self.validation_set)?;
        self.report_performance(training_error, validation_error);

        if validation_error < self.best_error {
            debug!(
                previous_best = self.best_error,
                validation_error, "Validation error improved, keeping network"
            );
            self.best_error = validation_error;
            self.best = Some(network.clone());
            self.iterations_since_best = 0;
        }
        self.iterations_since_best += 1;

        debug!(
            training_error,
            validation_error,
            iterations_since_best = self.iterations_since_best,
            "Evaluated network"
        );
        Ok(validation_error)
    }

    fn best_network(&self) -> Result<&NeuralNetwork, ModelError> {
        self.best.as_ref().ok_or(ModelError::NotEvaluated)
    }
}
