/// Module containing the fixed learning rate optimizer
pub mod fixed_learning_rate;
/// Module containing the momentum optimizer
pub mod momentum;

pub use fixed_learning_rate::*;
pub use momentum::*;
