use crate::ModelError;
use crate::dataset::Dataset;
use crate::matrix::DenseMatrix;
use crate::neural_network::NeuralNetwork;
use crate::neural_network::batching::BatchedDataset;
use rand::RngCore;
use std::collections::BTreeMap;
use std::fmt::Debug;

/// Element-wise (or row-wise) nonlinearity applied to a layer's pre-activation values.
///
/// Implementations are shared between copies of a network, so they must be stateless
/// and thread-safe.
pub trait ActivationFunction: Debug + Send + Sync {
    /// Applies the function to every row of `input`.
    ///
    /// # Parameters
    ///
    /// * `input` - Pre-activation values, one row per example
    ///
    /// # Returns
    ///
    /// * `DenseMatrix` - A new matrix of the same shape
    fn function(&self, input: &DenseMatrix) -> DenseMatrix;

    /// Derivative of the function, evaluated on the function's own output.
    ///
    /// # Parameters
    ///
    /// * `output` - The values previously returned by `function`
    ///
    /// # Returns
    ///
    /// * `DenseMatrix` - A new matrix of the same shape
    fn derivative(&self, output: &DenseMatrix) -> DenseMatrix;
}

/// Fills a weight matrix with initial values.
pub trait WeightInitializer: Debug + Send + Sync {
    /// Overwrites every element of `weights`, drawing randomness from `rng`.
    fn initialize(&self, weights: &mut DenseMatrix, rng: &mut dyn RngCore);
}

/// Turns per-layer gradients into per-layer weight corrections.
///
/// Stateful implementations (momentum) keep their history between calls, so an
/// optimizer instance belongs to exactly one training run.
pub trait OptimizationStrategy: Debug + Send {
    /// Computes the corrections to subtract from the weights.
    ///
    /// # Parameters
    ///
    /// * `gradients` - One gradient per layer, shaped like that layer's weights
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<DenseMatrix>)` - One correction per layer
    /// - `Err(ModelError)` - If the gradients do not line up with the optimizer's history
    fn calc_corrections(&mut self, gradients: &[DenseMatrix]) -> Result<Vec<DenseMatrix>, ModelError>;

    /// The step size this optimizer scales gradients by.
    fn learning_rate(&self) -> f64;
}

/// Shrinks weights before each correction is applied.
pub trait RegularizationStrategy: Debug + Send + Sync {
    /// *Mutates in place*. Adjusts one layer's weights.
    ///
    /// # Parameters
    ///
    /// - `weights` - The layer's weight matrix
    /// - `num_examples` - Number of examples in the batch that produced the gradient
    /// - `learning_rate` - The optimizer's learning rate
    fn adjust_weights(&self, weights: &mut DenseMatrix, num_examples: usize, learning_rate: f64);
}

/// Partitions a training set into the mini-batches of one training iteration.
pub trait BatchingStrategy: Debug + Send {
    /// Shuffles `dataset` and splits it into batches.
    ///
    /// # Returns
    ///
    /// - `Ok(BatchedDataset)` - A single-pass iterator over the batches
    /// - `Err(ModelError)` - If the dataset cannot be batched
    fn batched_dataset(
        &mut self,
        dataset: &Dataset,
        rng: &mut dyn RngCore,
    ) -> Result<BatchedDataset, ModelError>;
}

/// Scores a network on a labeled dataset.
pub trait PerformanceEvaluator: Debug + Send + Sync {
    /// Returns the fraction of examples the network gets wrong, in `[0, 1]`.
    ///
    /// # Errors
    ///
    /// - `ModelError::InputValidationError` - If `dataset` carries no labels
    /// - `ModelError::ShapeMismatch` - If the network output and labels differ in shape
    fn error(&self, network: &NeuralNetwork, dataset: &Dataset) -> Result<f64, ModelError>;
}

/// Receives named metrics after each halting evaluation.
pub trait PerformanceListener: Send {
    fn performance_event(&mut self, metrics: &BTreeMap<String, f64>);
}

/// Decides when training stops and remembers the best network seen so far.
pub trait HaltingStrategy: Send {
    /// Returns `true` once training should stop.
    fn should_halt(&self) -> bool;

    /// Scores `network` and updates the halting state.
    ///
    /// # Returns
    ///
    /// - `Ok(f64)` - The validation error of `network`
    /// - `Err(ModelError)` - If evaluation failed
    fn evaluate(&mut self, network: &NeuralNetwork) -> Result<f64, ModelError>;

    /// The best network evaluated so far.
    ///
    /// # Returns
    ///
    /// - `Ok(&NeuralNetwork)` - The retained best network
    /// - `Err(ModelError::NotEvaluated)` - If `evaluate` has never been called
    fn best_network(&self) -> Result<&NeuralNetwork, ModelError>;
}

/// Trains a network against a labeled dataset.
///
/// A trainer's strategies carry per-run state, so one trainer performs one training run.
pub trait SupervisedTrainer {
    /// Consumes `network`, trains it on `training_set` and returns the best network found.
    ///
    /// # Errors
    ///
    /// - `ModelError::AlreadyTrained` - If this trainer has already been used
    fn train(
        &mut self,
        network: NeuralNetwork,
        training_set: &Dataset,
    ) -> Result<NeuralNetwork, ModelError>;
}

/// Produces a dataset from some external source (files, databases, generators).
pub trait DataSource {
    fn load(&self) -> Result<Dataset, ModelError>;
}
