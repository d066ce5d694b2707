use crate::ModelError;
use crate::dataset::Dataset;
use crate::neural_network::backpropagation::{DeltaCalculator, GradientCalculator};
use crate::neural_network::batching::{FixedSizeBatching, FullBatching, GaussianNoiseBatching};
use crate::neural_network::network::NeuralNetwork;
use crate::neural_network::optimizer::{FixedLearningRate, Momentum};
use crate::neural_network::regularization::L2Regularization;
use crate::traits::{
    BatchingStrategy, HaltingStrategy, OptimizationStrategy, RegularizationStrategy,
    SupervisedTrainer,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

/// Configuration record for a `GradientDescentTrainer`.
///
/// # Fields
///
/// - `learning_rate` - Step size, defaults to `0.1`
/// - `momentum` - Momentum factor in `[0, 1)`, defaults to `0.1`; `0` selects plain fixed-rate descent
/// - `batch_size` - Rows per mini-batch; `None` (the default) trains on the full set each iteration
/// - `noise_probability` - When set, enables Gaussian noise augmentation with this per-cell probability
/// - `l2_regularization` - When set, enables L2 weight decay with this strength
/// - `seed` - Seed for every random draw the trainer makes; `None` seeds from the thread RNG
///
/// # Example
/// ```rust
/// use rustymlp::neural_network::TrainerConfig;
///
/// let config = TrainerConfig::from_json(r#"{ "batch_size": 32, "seed": 42 }"#).unwrap();
/// assert_eq!(config.learning_rate, 0.1);
/// assert_eq!(config.batch_size, Some(32));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    pub learning_rate: f64,
    pub momentum: f64,
    pub batch_size: Option<usize>,
    pub noise_probability: Option<f64>,
    pub l2_regularization: Option<f64>,
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.1,
            momentum: 0.1,
            batch_size: None,
            noise_probability: None,
            l2_regularization: None,
            seed: None,
        }
    }
}

impl TrainerConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Returns
    ///
    /// - `Ok(TrainerConfig)` - The parsed configuration
    /// - `Err(ModelError::ConfigurationError)` - If the JSON is malformed
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        serde_json::from_str(json)
            .map_err(|e| ModelError::ConfigurationError(format!("Invalid trainer config: {}", e)))
    }
}

fn as_configuration_error(error: ModelError) -> ModelError {
    match error {
        ModelError::InputValidationError(msg) => ModelError::ConfigurationError(msg),
        other => other,
    }
}

/// Mini-batch gradient descent with backpropagation.
///
/// Each training iteration asks the batching strategy for a fresh set of batches and, for
/// every batch in order, runs a training-mode forward pass, back-propagates the deltas,
/// averages them into gradients, turns those into corrections with the optimizer, applies
/// optional regularization and subtracts the corrections from the weights. Each batch's
/// update is visible to the next batch. After every iteration (and once before the first)
/// the halting strategy evaluates the network; training returns the best network the
/// halting strategy has seen, which is not necessarily the last one.
///
/// The trainer owns its optimizer (and therefore the optimizer's momentum history) and a
/// seeded `StdRng` used for shuffling, dropout and noise. The halting strategy and the
/// optimizer keep state from the run they took part in, so a trainer trains exactly one
/// network; later calls to `train` fail with `ModelError::AlreadyTrained`.
///
/// # Fields
///
/// - `batching` - Splits the training set into batches each iteration
/// - `optimization` - Turns gradients into corrections
/// - `regularization` - Optional weight adjustment before each correction
/// - `halting` - Decides when to stop and keeps the best network
/// - `delta_calculator` - Back-propagates output errors
/// - `gradient_calculator` - Averages deltas into gradients
/// - `rng` - Source of every random draw
/// - `iterations` - Training iterations completed by the `train` call
/// - `used` - Set once `train` has started
pub struct GradientDescentTrainer {
    batching: Box<dyn BatchingStrategy>,
    optimization: Box<dyn OptimizationStrategy>,
    regularization: Option<Box<dyn RegularizationStrategy>>,
    halting: Box<dyn HaltingStrategy>,
    delta_calculator: DeltaCalculator,
    gradient_calculator: GradientCalculator,
    rng: StdRng,
    iterations: usize,
    used: bool,
}

impl GradientDescentTrainer {
    /// Creates a trainer without regularization, seeded from the thread RNG.
    ///
    /// # Parameters
    ///
    /// - `batching` - Batching strategy
    /// - `optimization` - Optimizer; moved in so its history belongs to this trainer alone
    /// - `halting` - Halting strategy
    pub fn new(
        batching: Box<dyn BatchingStrategy>,
        optimization: Box<dyn OptimizationStrategy>,
        halting: Box<dyn HaltingStrategy>,
    ) -> Self {
        Self {
            batching,
            optimization,
            regularization: None,
            halting,
            delta_calculator: DeltaCalculator::new(),
            gradient_calculator: GradientCalculator::new(),
            rng: StdRng::from_rng(&mut rand::rng()),
            iterations: 0,
            used: false,
        }
    }

    /// Builds a trainer from a configuration record.
    ///
    /// Momentum `0` selects `FixedLearningRate`, anything else `Momentum`. A noise
    /// probability selects `GaussianNoiseBatching` (measuring feature statistics on
    /// `reference_set`); otherwise a batch size selects `FixedSizeBatching` and its absence
    /// `FullBatching`.
    ///
    /// # Parameters
    ///
    /// - `config` - Trainer settings
    /// - `reference_set` - Dataset whose feature statistics drive Gaussian noise (usually the training set)
    /// - `halting` - Halting strategy
    ///
    /// # Returns
    ///
    /// - `Ok(GradientDescentTrainer)` - The trainer
    /// - `Err(ModelError::ConfigurationError)` - If any setting is out of range
    pub fn from_config(
        config: &TrainerConfig,
        reference_set: &Dataset,
        halting: Box<dyn HaltingStrategy>,
    ) -> Result<Self, ModelError> {
        let optimization: Box<dyn OptimizationStrategy> = if config.momentum == 0.0 {
            Box::new(FixedLearningRate::new(config.learning_rate).map_err(as_configuration_error)?)
        } else {
            Box::new(
                Momentum::new(config.learning_rate, config.momentum)
                    .map_err(as_configuration_error)?,
            )
        };

        let batching: Box<dyn BatchingStrategy> = match (config.noise_probability, config.batch_size) {
            (Some(probability), batch_size) => Box::new(
                GaussianNoiseBatching::new(
                    batch_size.unwrap_or_else(|| reference_set.num_rows().max(1)),
                    probability,
                    reference_set,
                )
                .map_err(as_configuration_error)?,
            ),
            (None, Some(batch_size)) => {
                Box::new(FixedSizeBatching::new(batch_size).map_err(as_configuration_error)?)
            }
            (None, None) => Box::new(FullBatching::new()),
        };

        let mut trainer = Self::new(batching, optimization, halting);
        if let Some(lambda) = config.l2_regularization {
            trainer = trainer.with_regularization(Box::new(
                L2Regularization::new(lambda).map_err(as_configuration_error)?,
            ));
        }
        if let Some(seed) = config.seed {
            trainer = trainer.with_seed(seed);
        }
        Ok(trainer)
    }

    pub fn with_regularization(mut self, regularization: Box<dyn RegularizationStrategy>) -> Self {
        self.regularization = Some(regularization);
        self
    }

    /// Reseeds the trainer's RNG, making training reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn halting_strategy(&self) -> &dyn HaltingStrategy {
        self.halting.as_ref()
    }

    /// Training iterations completed by `train`.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Runs one pass over freshly produced batches, updating `network` after every batch.
    fn training_iteration(
        &mut self,
        network: &mut NeuralNetwork,
        training_set: &Dataset,
    ) -> Result<(), ModelError> {
        let batches = self.batching.batched_dataset(training_set, &mut self.rng)?;
        for (index, batch) in batches.enumerate() {
            let labels = batch.require_labels()?;
            let forward_pass = network.train_forward(batch.features(), &mut self.rng)?;
            let deltas = self
                .delta_calculator
                .calc_deltas(&forward_pass, labels, network)?;
            let gradients = self
                .gradient_calculator
                .calc_gradients(&deltas, forward_pass.node_values())?;
            let corrections = self.optimization.calc_corrections(&gradients)?;
            network.apply_corrections(
                &corrections,
                self.regularization.as_deref(),
                batch.num_rows(),
                self.optimization.learning_rate(),
            )?;
            trace!(batch = index, rows = batch.num_rows(), "Applied batch corrections");
        }
        Ok(())
    }
}

impl SupervisedTrainer for GradientDescentTrainer {
    /// Trains `network` until the halting strategy says stop.
    ///
    /// # Returns
    ///
    /// - `Ok(NeuralNetwork)` - A copy of the best network the halting strategy evaluated
    /// - `Err(ModelError::AlreadyTrained)` - If this trainer has already been used
    /// - `Err(ModelError::InputValidationError)` - If `training_set` has no labels
    /// - `Err(ModelError)` - Any error raised by a strategy or by the matrix algebra
    fn train(
        &mut self,
        mut network: NeuralNetwork,
        training_set: &Dataset,
    ) -> Result<NeuralNetwork, ModelError> {
        if self.used {
            return Err(ModelError::AlreadyTrained);
        }
        training_set.require_labels()?;
        self.used = true;
        info!(
            dimensions = ?network.dimensions(),
            rows = training_set.num_rows(),
            "Starting gradient descent"
        );

        self.halting.evaluate(&network)?;
        while !self.halting.should_halt() {
            self.training_iteration(&mut network, training_set)?;
            self.iterations += 1;
            let validation_error = self.halting.evaluate(&network)?;
            debug!(
                iteration = self.iterations,
                validation_error, "Finished training iteration"
            );
        }

        info!(iterations = self.iterations, "Training halted");
        Ok(self.halting.best_network()?.clone())
    }
}
