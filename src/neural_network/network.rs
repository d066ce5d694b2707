use crate::ModelError;
use crate::dataset::Dataset;
use crate::matrix::DenseMatrix;
use crate::neural_network::activation::Activation;
use crate::neural_network::weight_initializer::{DEFAULT_WEIGHT_RANGE, UniformWeightInitializer};
use crate::traits::{ActivationFunction, RegularizationStrategy, WeightInitializer};
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Configuration record for a `NeuralNetwork`.
///
/// Every field except `dimensions` has a default, so a JSON configuration only needs
/// to name the layer sizes.
///
/// # Fields
///
/// - `dimensions` - Node count of each level, input first and output last (at least two levels)
/// - `activation` - Hidden-layer activation, defaults to `Sigmoid`
/// - `output_function` - Output activation; `None` picks `Identity` for a single output node and `Sigmoid` otherwise
/// - `dropout_rate` - Probability of dropping a hidden node during training, in `[0, 1)`, defaults to `0`
/// - `weight_range` - Bounds of the uniform weight initializer, defaults to `(-0.04, 0.04)`
///
/// # Example
/// ```rust
/// use rustymlp::neural_network::{Activation, NetworkConfig};
///
/// let config = NetworkConfig::from_json(r#"{ "dimensions": [4, 8, 3], "activation": "ReLU" }"#).unwrap();
/// assert_eq!(config.activation, Activation::ReLU);
/// assert_eq!(config.resolved_output_function(), Activation::Sigmoid);
/// assert_eq!(config.dropout_rate, 0.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub dimensions: Vec<usize>,
    pub activation: Activation,
    pub output_function: Option<Activation>,
    pub dropout_rate: f64,
    pub weight_range: (f64, f64),
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            dimensions: Vec::new(),
            activation: Activation::Sigmoid,
            output_function: None,
            dropout_rate: 0.0,
            weight_range: DEFAULT_WEIGHT_RANGE,
        }
    }
}

impl NetworkConfig {
    pub fn new(dimensions: Vec<usize>) -> Self {
        Self {
            dimensions,
            ..Self::default()
        }
    }

    pub fn with_activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    pub fn with_output_function(mut self, output_function: Activation) -> Self {
        self.output_function = Some(output_function);
        self
    }

    pub fn with_dropout_rate(mut self, dropout_rate: f64) -> Self {
        self.dropout_rate = dropout_rate;
        self
    }

    pub fn with_weight_range(mut self, min: f64, max: f64) -> Self {
        self.weight_range = (min, max);
        self
    }

    /// Parses a configuration from JSON. Missing fields take their defaults.
    ///
    /// # Returns
    ///
    /// - `Ok(NetworkConfig)` - The parsed configuration
    /// - `Err(ModelError::ConfigurationError)` - If the JSON is malformed
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        serde_json::from_str(json)
            .map_err(|e| ModelError::ConfigurationError(format!("Invalid network config: {}", e)))
    }

    /// The output function that will actually be used.
    pub fn resolved_output_function(&self) -> Activation {
        self.output_function.unwrap_or_else(|| {
            Activation::default_output_for(self.dimensions.last().copied().unwrap_or(0))
        })
    }
}

/// Validates that a dropout rate lies in `[0, 1)`.
fn validate_dropout_rate(dropout_rate: f64) -> Result<(), ModelError> {
    if !(0.0..1.0).contains(&dropout_rate) {
        return Err(ModelError::ConfigurationError(format!(
            "dropout_rate must be in range [0, 1), got {}",
            dropout_rate
        )));
    }
    Ok(())
}

/// Checks that a non-empty list of weight matrices chains: layer `i + 1` has one row
/// (its bias) more than layer `i` has columns.
fn validate_layers(layers: &[DenseMatrix]) -> Result<(), ModelError> {
    if layers.is_empty() {
        return Err(ModelError::ConfigurationError(
            "A network needs at least one weight layer".to_string(),
        ));
    }
    if let Some(layer) = layers.iter().find(|l| l.num_rows() < 2 || l.num_cols() == 0) {
        return Err(ModelError::ConfigurationError(format!(
            "Weight layer of shape {} x {} cannot connect non-empty levels",
            layer.num_rows(),
            layer.num_cols()
        )));
    }
    for pair in layers.windows(2) {
        if pair[1].num_rows() != pair[0].num_cols() + 1 {
            return Err(ModelError::shape_mismatch(
                "NeuralNetwork layers",
                pair[0].shape(),
                pair[1].shape(),
            ));
        }
    }
    Ok(())
}

/// Output of one forward pass.
///
/// `node_values` holds the input followed by the activations of every level,
/// `[X, A_1, ..., A_L]`. In training mode `dropout_masks` holds one 0/1 mask per hidden
/// level; the delta calculator needs them to route error only through kept nodes.
/// In inference mode no masks are produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPass {
    node_values: Vec<DenseMatrix>,
    dropout_masks: Vec<DenseMatrix>,
}

impl ForwardPass {
    pub fn new(node_values: Vec<DenseMatrix>, dropout_masks: Vec<DenseMatrix>) -> Self {
        Self {
            node_values,
            dropout_masks,
        }
    }

    pub fn node_values(&self) -> &[DenseMatrix] {
        &self.node_values
    }

    pub fn dropout_masks(&self) -> &[DenseMatrix] {
        &self.dropout_masks
    }

    /// Activations of the output level.
    pub fn output(&self) -> Option<&DenseMatrix> {
        self.node_values.last()
    }

    pub fn into_output(mut self) -> Option<DenseMatrix> {
        self.node_values.pop()
    }
}

/// A fully connected multi-layer perceptron.
///
/// Weights are stored as one matrix per pair of adjacent levels. `layers[i]` has shape
/// `(dim[i] + 1) x dim[i + 1]`; its first row holds the bias weights, which multiply the
/// column of ones prepended to the previous level's activations.
///
/// Activation functions and the weight initializer are shared (`Arc`) between clones;
/// weights are not. `Clone` is therefore a deep copy of everything that training mutates.
///
/// # Example
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use rustymlp::matrix::DenseMatrix;
/// use rustymlp::neural_network::{NetworkConfig, NeuralNetwork};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let network = NeuralNetwork::from_config(&NetworkConfig::new(vec![2, 3, 1]), &mut rng).unwrap();
/// assert_eq!(network.dimensions(), vec![2, 3, 1]);
///
/// let output = network.analyze(&DenseMatrix::from_grid(&[[0.0, 1.0]])).unwrap();
/// assert_eq!(output.shape(), (1, 1));
/// ```
#[derive(Debug, Clone)]
pub struct NeuralNetwork {
    layers: Vec<DenseMatrix>,
    activation_function: Arc<dyn ActivationFunction>,
    output_function: Arc<dyn ActivationFunction>,
    weight_initializer: Arc<dyn WeightInitializer>,
    dropout_rate: f64,
}

impl NeuralNetwork {
    /// Builds and initializes a network from a configuration.
    ///
    /// # Parameters
    ///
    /// - `config` - Layer sizes, activations, dropout and weight range
    /// - `rng` - Source of randomness for the initial weights
    ///
    /// # Returns
    ///
    /// - `Ok(NeuralNetwork)` - A network with freshly initialized weights
    /// - `Err(ModelError::ConfigurationError)` - With fewer than two levels, a zero-sized level,
    ///   a dropout rate outside `[0, 1)` or an invalid weight range
    pub fn from_config(config: &NetworkConfig, rng: &mut dyn RngCore) -> Result<Self, ModelError> {
        if config.dimensions.len() < 2 {
            return Err(ModelError::ConfigurationError(format!(
                "A network needs at least an input and an output level, got dimensions {:?}",
                config.dimensions
            )));
        }
        if config.dimensions.contains(&0) {
            return Err(ModelError::ConfigurationError(format!(
                "Every level needs at least one node, got dimensions {:?}",
                config.dimensions
            )));
        }
        validate_dropout_rate(config.dropout_rate)?;
        let initializer = UniformWeightInitializer::new(config.weight_range.0, config.weight_range.1)?;

        let layers = config
            .dimensions
            .windows(2)
            .map(|pair| DenseMatrix::zeros(pair[0] + 1, pair[1]))
            .collect();

        let mut network = Self {
            layers,
            activation_function: Arc::new(config.activation),
            output_function: Arc::new(config.resolved_output_function()),
            weight_initializer: Arc::new(initializer),
            dropout_rate: config.dropout_rate,
        };
        network.initialize_weights(rng);
        Ok(network)
    }

    /// Wraps explicit weight matrices.
    ///
    /// The weight initializer defaults to the uniform `(-0.04, 0.04)` initializer and is only
    /// used if `set_weight_initializer` is called later; `layers` are kept as given.
    ///
    /// # Returns
    ///
    /// - `Ok(NeuralNetwork)` - The network
    /// - `Err(ModelError::ConfigurationError)` - If `layers` is empty or a layer is degenerate
    /// - `Err(ModelError::ShapeMismatch)` - If consecutive layers do not chain
    pub fn from_layers(
        layers: Vec<DenseMatrix>,
        activation_function: Arc<dyn ActivationFunction>,
        output_function: Arc<dyn ActivationFunction>,
    ) -> Result<Self, ModelError> {
        validate_layers(&layers)?;
        Ok(Self {
            layers,
            activation_function,
            output_function,
            weight_initializer: Arc::new(UniformWeightInitializer::default()),
            dropout_rate: 0.0,
        })
    }

    fn initialize_weights(&mut self, rng: &mut dyn RngCore) {
        for layer in self.layers.iter_mut() {
            self.weight_initializer.initialize(layer, rng);
        }
    }

    pub fn layers(&self) -> &[DenseMatrix] {
        &self.layers
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Node count of each level, input first.
    pub fn dimensions(&self) -> Vec<usize> {
        let mut dimensions = Vec::with_capacity(self.layers.len() + 1);
        if let Some(first) = self.layers.first() {
            dimensions.push(first.num_rows() - 1);
        }
        dimensions.extend(self.layers.iter().map(|layer| layer.num_cols()));
        dimensions
    }

    /// Replaces every weight matrix.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The layers were replaced
    /// - `Err(ModelError)` - If the layers are empty or do not chain; the network is unchanged
    pub fn set_layers(&mut self, layers: Vec<DenseMatrix>) -> Result<(), ModelError> {
        validate_layers(&layers)?;
        self.layers = layers;
        Ok(())
    }

    pub fn activation_function(&self) -> &Arc<dyn ActivationFunction> {
        &self.activation_function
    }

    pub fn set_activation_function(&mut self, activation_function: Arc<dyn ActivationFunction>) {
        self.activation_function = activation_function;
    }

    pub fn output_function(&self) -> &Arc<dyn ActivationFunction> {
        &self.output_function
    }

    pub fn set_output_function(&mut self, output_function: Arc<dyn ActivationFunction>) {
        self.output_function = output_function;
    }

    pub fn weight_initializer(&self) -> &Arc<dyn WeightInitializer> {
        &self.weight_initializer
    }

    /// Replaces the weight initializer and immediately re-initializes every layer.
    ///
    /// Any training progress held in the current weights is lost.
    pub fn set_weight_initializer(
        &mut self,
        weight_initializer: Arc<dyn WeightInitializer>,
        rng: &mut dyn RngCore,
    ) {
        self.weight_initializer = weight_initializer;
        self.initialize_weights(rng);
    }

    pub fn dropout_rate(&self) -> f64 {
        self.dropout_rate
    }

    /// Sets the probability of dropping each hidden node during training.
    ///
    /// # Returns
    ///
    /// - `Ok(())` - The rate was set
    /// - `Err(ModelError::ConfigurationError)` - If the rate is outside `[0, 1)`
    pub fn set_dropout_rate(&mut self, dropout_rate: f64) -> Result<(), ModelError> {
        validate_dropout_rate(dropout_rate)?;
        self.dropout_rate = dropout_rate;
        Ok(())
    }

    /// Forward pass in training mode.
    ///
    /// For every hidden level `A = act(addBiasColumn(A_prev) x W)` and, when dropout is
    /// enabled, `A` is multiplied by a fresh Bernoulli mask where each node is dropped
    /// (0) with probability `dropout_rate` and kept (1) otherwise. Kept activations are
    /// not rescaled. The output level uses the output function and is never dropped.
    ///
    /// # Parameters
    ///
    /// - `features` - `m x dim[0]` input batch
    /// - `rng` - Source of randomness for the dropout masks
    ///
    /// # Returns
    ///
    /// - `Ok(ForwardPass)` - `layers + 1` node values and `layers - 1` masks
    /// - `Err(ModelError::ShapeMismatch)` - If `features` has the wrong number of columns
    pub fn train_forward(
        &self,
        features: &DenseMatrix,
        rng: &mut dyn RngCore,
    ) -> Result<ForwardPass, ModelError> {
        let last = self.layers.len() - 1;
        let mut node_values = Vec::with_capacity(self.layers.len() + 1);
        let mut dropout_masks = Vec::with_capacity(last);
        node_values.push(features.clone());

        for (index, layer) in self.layers.iter().enumerate() {
            let weighted = node_values[index].add_bias_column().multiply(layer)?;
            let activations = if index < last {
                let mut activations = self.activation_function.function(&weighted);
                let mask = self.dropout_mask(activations.num_rows(), activations.num_cols(), rng);
                activations.element_mult_in_place(&mask)?;
                dropout_masks.push(mask);
                activations
            } else {
                self.output_function.function(&weighted)
            };
            node_values.push(activations);
        }

        Ok(ForwardPass::new(node_values, dropout_masks))
    }

    /// Forward pass in inference mode.
    ///
    /// Hidden activations are scaled by `1 - dropout_rate`, the expected value of the
    /// training-time mask. No masks are returned.
    ///
    /// # Returns
    ///
    /// - `Ok(ForwardPass)` - `layers + 1` node values and no masks
    /// - `Err(ModelError::ShapeMismatch)` - If `features` has the wrong number of columns
    pub fn infer_forward(&self, features: &DenseMatrix) -> Result<ForwardPass, ModelError> {
        let last = self.layers.len() - 1;
        let keep_rate = 1.0 - self.dropout_rate;
        let mut node_values = Vec::with_capacity(self.layers.len() + 1);
        node_values.push(features.clone());

        for (index, layer) in self.layers.iter().enumerate() {
            let weighted = node_values[index].add_bias_column().multiply(layer)?;
            let activations = if index < last {
                let mut activations = self.activation_function.function(&weighted);
                if self.dropout_rate > 0.0 {
                    activations.scale_in_place(keep_rate);
                }
                activations
            } else {
                self.output_function.function(&weighted)
            };
            node_values.push(activations);
        }

        Ok(ForwardPass::new(node_values, Vec::new()))
    }

    /// Runs inference and returns only the output activations.
    pub fn analyze(&self, features: &DenseMatrix) -> Result<DenseMatrix, ModelError> {
        self.infer_forward(features)?.into_output().ok_or_else(|| {
            ModelError::InputValidationError("Forward pass produced no output".to_string())
        })
    }

    /// Runs inference on a dataset's features.
    pub fn analyze_dataset(&self, dataset: &Dataset) -> Result<DenseMatrix, ModelError> {
        self.analyze(dataset.features())
    }

    /// *Mutates in place*. Applies one round of weight corrections.
    ///
    /// For each layer the regularization strategy (if any) adjusts the weights first, then
    /// the correction is subtracted.
    ///
    /// # Parameters
    ///
    /// - `corrections` - One correction per layer, shaped like that layer
    /// - `regularization` - Optional weight adjustment applied before the correction
    /// - `num_examples` - Number of examples in the batch that produced the corrections
    /// - `learning_rate` - The optimizer's learning rate, passed to the regularization
    ///
    /// # Returns
    ///
    /// - `Ok(())` - Every layer was updated
    /// - `Err(ModelError)` - If the corrections do not match the layers; no layer is modified
    pub fn apply_corrections(
        &mut self,
        corrections: &[DenseMatrix],
        regularization: Option<&dyn RegularizationStrategy>,
        num_examples: usize,
        learning_rate: f64,
    ) -> Result<(), ModelError> {
        if corrections.len() != self.layers.len() {
            return Err(ModelError::InputValidationError(format!(
                "Expected {} corrections, one per layer, got {}",
                self.layers.len(),
                corrections.len()
            )));
        }
        if let Some((layer, correction)) = self
            .layers
            .iter()
            .zip(corrections)
            .find(|(layer, correction)| layer.shape() != correction.shape())
        {
            return Err(ModelError::shape_mismatch(
                "apply_corrections",
                layer.shape(),
                correction.shape(),
            ));
        }

        for (layer, correction) in self.layers.iter_mut().zip(corrections) {
            if let Some(regularization) = regularization {
                regularization.adjust_weights(layer, num_examples, learning_rate);
            }
            layer.minus_in_place(correction)?;
        }
        Ok(())
    }

    fn dropout_mask(&self, rows: usize, cols: usize, rng: &mut dyn RngCore) -> DenseMatrix {
        let mut mask = DenseMatrix::ones(rows, cols);
        if self.dropout_rate > 0.0 {
            let rate = self.dropout_rate;
            mask.fill_with(|| if rng.random::<f64>() < rate { 0.0 } else { 1.0 });
        }
        mask
    }
}
