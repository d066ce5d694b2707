/// Splits a dataset into consecutive, non-overlapping subsets by proportion
pub mod dataset_splitter;

pub use dataset_splitter::*;
