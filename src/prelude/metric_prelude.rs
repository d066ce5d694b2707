pub use crate::metric::{
    ClassificationPerformanceEvaluator,
    PerformanceHistory,
    TEST_SET_PERCENT_WRONG,
    TRAINING_SET_PERCENT_WRONG,
    ThresholdPerformanceEvaluator,
    TracingPerformanceListener,
    VALIDATION_SET_PERCENT_WRONG,
};
