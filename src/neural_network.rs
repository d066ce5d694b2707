/// Module that contains the built-in activation functions
pub mod activation;
/// Module that contains the delta and gradient calculations of backpropagation
pub mod backpropagation;
/// Module that contains mini-batch construction and batching strategies
pub mod batching;
/// Module that contains early-stopping strategies
pub mod halting;
/// Module that contains parameter validation shared by optimizers, regularization and batching
pub(crate) mod input_validation_function;
/// Module that contains the multi-layer perceptron and its forward pass
pub mod network;
/// Module that contains optimization algorithms for gradient descent
pub mod optimizer;
/// Module that contains weight regularization strategies
pub mod regularization;
/// Module that contains the gradient descent trainer and its configuration
pub mod trainer;
/// Module that contains weight initializers
pub mod weight_initializer;

pub use activation::*;
pub use backpropagation::*;
pub use batching::*;
pub use halting::*;
pub use network::*;
pub use optimizer::*;
pub use regularization::*;
pub use trainer::*;
pub use weight_initializer::*;
