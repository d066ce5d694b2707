/// Module containing performance evaluators that score a network on a dataset
pub mod performance_evaluator;
/// Module containing performance listeners that receive metrics during training
pub mod performance_listener;

pub use performance_evaluator::*;
pub use performance_listener::*;

/// Metric key for the fraction of training set examples the network gets wrong.
pub const TRAINING_SET_PERCENT_WRONG: &str = "Training Set % Wrong";
/// Metric key for the fraction of validation set examples the network gets wrong.
pub const VALIDATION_SET_PERCENT_WRONG: &str = "Validation Set % Wrong";
/// Metric key for the fraction of test set examples the network gets wrong.
pub const TEST_SET_PERCENT_WRONG: &str = "Test Set % Wrong";
