/// Error type shared by every fallible operation in the crate.
///
/// `ModelError` distinguishes shape mismatches, invalid ranges, bad configuration, malformed
/// call inputs and asking for a best network before any evaluation happened.
pub mod error;

pub use error::ModelError;

/// Traits at the seams of the training engine.
///
/// Every pluggable piece of gradient descent is described by a small trait with a single
/// responsibility, so strategies can be swapped or replaced by custom implementations.
///
/// # Traits
/// - `ActivationFunction` - Nonlinearity and its derivative (in terms of its output)
/// - `WeightInitializer` - Fills weight matrices with initial values
/// - `OptimizationStrategy` - Turns gradients into weight corrections
/// - `RegularizationStrategy` - Adjusts weights before each correction
/// - `BatchingStrategy` - Splits the training set into mini-batches
/// - `PerformanceEvaluator` - Scores a network on a dataset
/// - `PerformanceListener` - Receives named metrics during training
/// - `HaltingStrategy` - Decides when to stop and keeps the best network
/// - `SupervisedTrainer` - Trains a network on a labeled dataset
/// - `DataSource` - Produces datasets from external sources
pub mod traits;

/// Dense two-dimensional `f64` matrices, the numeric kernel of the crate.
///
/// `DenseMatrix` wraps `ndarray::Array2<f64>` and adds the operations a multi-layer
/// perceptron needs: elementwise arithmetic in copying and in-place forms, matrix
/// products, half-open slicing, bias row/column helpers, axis reductions and parallel
/// elementwise maps. Equality is approximate, within `EQUALITY_TOLERANCE`.
///
/// # Example
/// ```rust
/// use rustymlp::matrix::DenseMatrix;
///
/// let inputs = DenseMatrix::from_grid(&[[1.0, 2.0]]);
/// let weights = DenseMatrix::from_grid(&[[0.5], [1.0], [-1.0]]);
///
/// // bias column, then weights
/// let output = inputs.add_bias_column().multiply(&weights).unwrap();
/// assert_eq!(output.get(0, 0), -0.5);
/// ```
pub mod matrix;

/// Datasets of feature and label rows, and the `DataSource` seam for loading them.
pub mod dataset;

/// Data preparation helpers.
///
/// # Contents
/// - **DataSetSplitter**: Splits a dataset into consecutive training/validation/test subsets by proportion
pub mod utility;

/// Performance evaluation and reporting during training.
///
/// # Evaluators
/// - **ClassificationPerformanceEvaluator**: Fraction of rows whose argmax answer differs from a one-hot label
/// - **ThresholdPerformanceEvaluator**: Fraction of rows whose thresholded 0/1 answer differs from the label
///
/// # Listeners
/// - **TracingPerformanceListener**: Logs each evaluation through `tracing`
/// - **PerformanceHistory**: Records each evaluation for later inspection or charting
///
/// # Metric keys
/// - `TRAINING_SET_PERCENT_WRONG`, `VALIDATION_SET_PERCENT_WRONG`, `TEST_SET_PERCENT_WRONG`
pub mod metric;

/// Multi-layer perceptrons and everything needed to train them with mini-batch gradient descent.
///
/// # Core Components
///
/// ## Network
/// - **NeuralNetwork**: Fully connected layers with bias rows, configurable activations and dropout
/// - **NetworkConfig**: Serializable configuration with defaults
/// - **ForwardPass**: Node values and dropout masks of one forward pass
///
/// ## Backpropagation
/// - **DeltaCalculator**: Back-propagates output error through the layers
/// - **GradientCalculator**: Averages deltas into per-layer gradients
///
/// ## Strategies
/// - **Activation**: Identity, ReLU, Sigmoid and Softmax
/// - **UniformWeightInitializer** / **ConstantWeightInitializer**: Initial weights
/// - **FixedLearningRate** / **Momentum**: Optimizers
/// - **L2Regularization**: Weight decay
/// - **FixedSizeBatching** / **FullBatching** / **GaussianNoiseBatching**: Mini-batch construction
/// - **ValidationSetHaltingStrategy**: Early stopping on a validation set
///
/// ## Training
/// - **GradientDescentTrainer**: The training loop
/// - **TrainerConfig**: Serializable configuration with defaults
///
/// # Examples
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use rustymlp::prelude::*;
///
/// let features = DenseMatrix::from_grid(&[[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]]);
/// let labels = DenseMatrix::from_grid(&[[0.0], [0.0], [0.0], [1.0]]);
/// let dataset = Dataset::labeled(features, labels).unwrap();
///
/// let mut rng = StdRng::seed_from_u64(3);
/// let network = NeuralNetwork::from_config(&NetworkConfig::new(vec![2, 1]), &mut rng).unwrap();
///
/// let halting = ValidationSetHaltingStrategy::new(
///     dataset.clone(),
///     dataset.clone(),
///     Box::new(ThresholdPerformanceEvaluator::new(0.5)),
///     5,
/// ).unwrap();
///
/// let config = TrainerConfig { seed: Some(3), ..TrainerConfig::default() };
/// let mut trainer = GradientDescentTrainer::from_config(&config, &dataset, Box::new(halting)).unwrap();
/// let trained = trainer.train(network, &dataset).unwrap();
/// assert_eq!(trained.dimensions(), vec![2, 1]);
/// ```
pub mod neural_network;

/// A convenience module that re-exports the most commonly used types and traits from this crate.
///
/// # Examples
/// ```rust
/// use rustymlp::prelude::*;
///
/// let matrix = DenseMatrix::zeros(2, 3);
/// assert_eq!(matrix.shape(), (2, 3));
/// ```
pub mod prelude;
