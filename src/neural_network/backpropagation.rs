use crate::ModelError;
use crate::matrix::DenseMatrix;
use crate::neural_network::network::{ForwardPass, NeuralNetwork};
use rayon::prelude::*;

/// Back-propagates the output error through the network.
///
/// For a network with `L` weight layers the deltas are
///
/// ```text
/// delta_L = (A_L - labels) ⊙ out'(A_L)
/// delta_i = (delta_{i+1} x removeBiasRow(W_{i+1})^T) ⊙ act'(A_i) ⊙ mask_i
/// ```
///
/// where `A_i` are the node values of the forward pass and `mask_i` its dropout masks.
/// A pass without masks (inference mode, or a hand-built pass) propagates through
/// every node.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeltaCalculator;

impl DeltaCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Computes one delta matrix per weight layer.
    ///
    /// # Parameters
    ///
    /// - `forward_pass` - Node values `[X, A_1, ..., A_L]` and optional dropout masks
    /// - `labels` - Target values, shaped like `A_L`
    /// - `network` - The network that produced `forward_pass`
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<DenseMatrix>)` - `L` deltas; `deltas[i]` is shaped like node value `i + 1`
    /// - `Err(ModelError::InputValidationError)` - If the node value or mask counts do not match the network
    /// - `Err(ModelError::ShapeMismatch)` - If labels or node values have incompatible shapes
    pub fn calc_deltas(
        &self,
        forward_pass: &ForwardPass,
        labels: &DenseMatrix,
        network: &NeuralNetwork,
    ) -> Result<Vec<DenseMatrix>, ModelError> {
        let layers = network.layers();
        let node_values = forward_pass.node_values();
        let masks = forward_pass.dropout_masks();
        let num_layers = layers.len();

        if node_values.len() != num_layers + 1 {
            return Err(ModelError::InputValidationError(format!(
                "Expected {} node values for {} layers, got {}",
                num_layers + 1,
                num_layers,
                node_values.len()
            )));
        }
        if !masks.is_empty() && masks.len() != num_layers - 1 {
            return Err(ModelError::InputValidationError(format!(
                "Expected 0 or {} dropout masks, got {}",
                num_layers - 1,
                masks.len()
            )));
        }

        let outputs = &node_values[num_layers];
        let mut output_delta = outputs.minus(labels)?;
        output_delta.element_mult_in_place(&network.output_function().derivative(outputs))?;

        let mut deltas = vec![output_delta];
        for i in (1..num_layers).rev() {
            let weights_no_bias = layers[i].remove_bias_row();
            let upstream = &deltas[deltas.len() - 1];
            let mut delta = upstream.multiply(&weights_no_bias.transpose())?;
            delta.element_mult_in_place(&network.activation_function().derivative(&node_values[i]))?;
            if let Some(mask) = masks.get(i - 1) {
                delta.element_mult_in_place(mask)?;
            }
            deltas.push(delta);
        }

        deltas.reverse();
        Ok(deltas)
    }
}

/// Turns deltas into the average gradient of the error with respect to each weight.
///
/// ```text
/// gradient_i = addBiasColumn(A_{i-1})^T x delta_i / m
/// ```
///
/// with `m` the number of examples (rows) in the batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradientCalculator;

impl GradientCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Computes one gradient per layer, in parallel.
    ///
    /// # Parameters
    ///
    /// - `deltas` - Output of `DeltaCalculator::calc_deltas`
    /// - `node_values` - Node values of the same forward pass; the output level may be
    ///   included or omitted, it is not used
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<DenseMatrix>)` - One gradient per layer, shaped like that layer's weights
    /// - `Err(ModelError::InputValidationError)` - If there are too few node values
    /// - `Err(ModelError::ShapeMismatch)` - If a delta does not line up with its node values
    pub fn calc_gradients(
        &self,
        deltas: &[DenseMatrix],
        node_values: &[DenseMatrix],
    ) -> Result<Vec<DenseMatrix>, ModelError> {
        if node_values.len() != deltas.len() && node_values.len() != deltas.len() + 1 {
            return Err(ModelError::InputValidationError(format!(
                "Expected {} or {} node values for {} deltas, got {}",
                deltas.len(),
                deltas.len() + 1,
                deltas.len(),
                node_values.len()
            )));
        }

        deltas
            .par_iter()
            .zip(node_values.par_iter())
            .map(|(delta, inputs)| -> Result<DenseMatrix, ModelError> {
                let mut gradient = inputs.add_bias_column().transpose().multiply(delta)?;
                gradient.divide_scalar_in_place(delta.num_rows() as f64);
                Ok(gradient)
            })
            .collect()
    }
}
