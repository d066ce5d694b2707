/// Prelude module for datasets and data sources.
pub mod dataset_prelude;
/// Prelude module for performance evaluation and reporting.
pub mod metric_prelude;
/// Prelude module for networks, strategies and training.
pub mod neural_network_prelude;
/// Prelude module for utility functions.
pub mod utility_prelude;

pub use crate::error::ModelError;
pub use crate::matrix::DenseMatrix;
pub use crate::traits::*;
pub use dataset_prelude::*;
pub use metric_prelude::*;
pub use neural_network_prelude::*;
pub use utility_prelude::*;
