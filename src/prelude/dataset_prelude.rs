pub use crate::dataset::{Dataset, InMemoryDataSource};
