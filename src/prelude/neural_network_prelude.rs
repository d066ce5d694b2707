pub use crate::neural_network::activation::Activation;
pub use crate::neural_network::backpropagation::{DeltaCalculator, GradientCalculator};
pub use crate::neural_network::batching::{
    BatchedDataset, FixedSizeBatching, FullBatching, GaussianNoiseBatching,
};
pub use crate::neural_network::halting::ValidationSetHaltingStrategy;
pub use crate::neural_network::network::{ForwardPass, NetworkConfig, NeuralNetwork};
pub use crate::neural_network::optimizer::{FixedLearningRate, Momentum};
pub use crate::neural_network::regularization::L2Regularization;
pub use crate::neural_network::trainer::{GradientDescentTrainer, TrainerConfig};
pub use crate::neural_network::weight_initializer::{
    ConstantWeightInitializer, UniformWeightInitializer,
};
