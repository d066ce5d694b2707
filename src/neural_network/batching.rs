/// Module containing the single-pass batch iterator
pub mod batched_dataset;
/// Module containing the fixed-size and full-set batching strategies
pub mod fixed_size_batching;
/// Module containing the Gaussian noise (data augmentation) batching strategy
pub mod gaussian_noise_batching;

pub use batched_dataset::*;
pub use fixed_size_batching::*;
pub use gaussian_noise_batching::*;
