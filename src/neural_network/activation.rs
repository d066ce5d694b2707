use crate::matrix::DenseMatrix;
use crate::traits::ActivationFunction;
use serde::{Deserialize, Serialize};

/// Built-in activation functions: Identity, ReLU, Sigmoid, and Softmax
///
/// Every derivative is expressed in terms of the function's output, which is what the
/// forward pass keeps as node values.
///
/// # Variants
///
/// - `Identity` - `f(x) = x`, `f'(y) = 1`
/// - `ReLU` - `f(x) = max(0, x)`, `f'(y) = 1` if `y > 0` else `0`
/// - `Sigmoid` - `f(x) = 1 / (1 + e^-x)`, `f'(y) = y(1 - y)`
/// - `Softmax` - Row-wise `e^x_j / sum_k e^x_k`. Its derivative is all ones, so a softmax
///   output layer yields the delta `output - label` (the cross-entropy gradient).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Activation {
    Identity,
    ReLU,
    #[default]
    Sigmoid,
    Softmax,
}

impl Activation {
    /// Picks the output function used when none is configured: Identity for a single
    /// output node (regression), Sigmoid otherwise.
    pub fn default_output_for(output_nodes: usize) -> Self {
        if output_nodes == 1 {
            Activation::Identity
        } else {
            Activation::Sigmoid
        }
    }
}

impl ActivationFunction for Activation {
    fn function(&self, input: &DenseMatrix) -> DenseMatrix {
        match self {
            Activation::Identity => input.clone(),
            Activation::ReLU => input.apply(|x| if x > 0.0 { x } else { 0.0 }),
            Activation::Sigmoid => input.apply(|x| 1.0 / (1.0 + (-x).exp())),
            Activation::Softmax => {
                let mut out = input.clone();
                // Shifting by the row max leaves the result unchanged and keeps exp() finite
                out.apply_to_rows_in_place(|row| {
                    let max_val = row.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                    row.iter_mut().for_each(|x| *x = (*x - max_val).exp());
                    let sum: f64 = row.iter().sum();
                    row.iter_mut().for_each(|x| *x /= sum);
                });
                out
            }
        }
    }

    fn derivative(&self, output: &DenseMatrix) -> DenseMatrix {
        match self {
            Activation::Identity | Activation::Softmax => {
                DenseMatrix::ones(output.num_rows(), output.num_cols())
            }
            Activation::ReLU => output.apply(|y| if y > 0.0 { 1.0 } else { 0.0 }),
            Activation::Sigmoid => output.apply(|y| y * (1.0 - y)),
        }
    }
}
