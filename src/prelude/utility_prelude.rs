pub use crate::utility::dataset_splitter::DataSetSplitter;
