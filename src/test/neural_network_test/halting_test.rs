use super::*;
use crate::metric::{PerformanceHistory, TRAINING_SET_PERCENT_WRONG, VALIDATION_SET_PERCENT_WRONG};

/// Reports the network's first weight as its error, so each test network
/// carries the score it should get.
#[derive(Debug)]
struct FirstWeightEvaluator;

impl PerformanceEvaluator for FirstWeightEvaluator {
    fn error(&self, network: &NeuralNetwork, _dataset: &Dataset) -> Result<f64, ModelError> {
        Ok(network.layers()[0].get(0, 0))
    }
}

fn scored_network(error: f64) -> NeuralNetwork {
    NeuralNetwork::from_layers(
        vec![DenseMatrix::filled(2, 1, error)],
        Arc::new(Activation::Identity),
        Arc::new(Activation::Identity),
    )
    .unwrap()
}

fn labeled_set() -> Dataset {
    Dataset::labeled(DenseMatrix::zeros(2, 1), DenseMatrix::zeros(2, 1)).unwrap()
}

fn strategy(patience: usize) -> ValidationSetHaltingStrategy {
    ValidationSetHaltingStrategy::new(
        labeled_set(),
        labeled_set(),
        Box::new(FirstWeightEvaluator),
        patience,
    )
    .unwrap()
}

#[test]
fn halts_after_patience_is_exhausted_test() {
    let mut halting = strategy(2);
    assert_eq!(halting.patience(), 2);
    assert!(!halting.should_halt());

    let errors = [0.6, 0.5, 0.55, 0.55];
    let expected_halt = [false, false, false, true];
    for (error, should_halt) in errors.iter().zip(expected_halt) {
        let reported = halting.evaluate(&scored_network(*error)).unwrap();
        assert_eq!(reported, *error);
        assert_eq!(halting.should_halt(), should_halt, "after error {}", error);
    }

    assert_eq!(halting.best_error(), 0.5);
    assert_eq!(halting.iterations_since_best(), 3);
    assert_eq!(halting.best_network().unwrap().layers()[0].get(0, 0), 0.5);
}

#[test]
fn improvement_resets_the_counter_test() {
    let mut halting = strategy(1);
    halting.evaluate(&scored_network(0.9)).unwrap();
    halting.evaluate(&scored_network(0.9)).unwrap();
    assert!(halting.should_halt());

    // a strictly better network resumes training
    halting.evaluate(&scored_network(0.8)).unwrap();
    assert!(!halting.should_halt());
    assert_eq!(halting.iterations_since_best(), 1);
}

#[test]
fn equal_error_is_not_an_improvement_test() {
    let mut halting = strategy(5);
    halting.evaluate(&scored_network(0.4)).unwrap();

    let mut tied = scored_network(0.4);
    tied.set_layers(vec![DenseMatrix::from_column(&[0.4, 7.0])]).unwrap();
    halting.evaluate(&tied).unwrap();

    // the first network with the best error is kept
    assert_eq!(halting.best_network().unwrap().layers()[0].get(1, 0), 0.4);
}

#[test]
fn zero_error_halts_immediately_test() {
    let mut halting = strategy(100);
    halting.evaluate(&scored_network(0.0)).unwrap();
    assert!(halting.should_halt());
    assert_eq!(halting.best_error(), 0.0);
}

#[test]
fn best_network_is_a_deep_copy_test() {
    let mut halting = strategy(3);
    let mut network = scored_network(0.3);
    halting.evaluate(&network).unwrap();

    network
        .apply_corrections(&[DenseMatrix::filled(2, 1, 0.1)], None, 1, 0.1)
        .unwrap();
    assert_eq!(halting.best_network().unwrap().layers()[0].get(0, 0), 0.3);
}

#[test]
fn best_network_before_evaluation_test() {
    let halting = strategy(3);
    assert!(matches!(
        halting.best_network(),
        Err(ModelError::NotEvaluated)
    ));
}

#[test]
fn requires_labeled_sets_test() {
    let unlabeled = Dataset::unlabeled(DenseMatrix::zeros(2, 1));
    let result = ValidationSetHaltingStrategy::new(
        labeled_set(),
        unlabeled,
        Box::new(FirstWeightEvaluator),
        3,
    );
    assert!(matches!(result, Err(ModelError::InputValidationError(_))));
}

#[test]
fn listeners_receive_both_errors_test() {
    let history = PerformanceHistory::new();
    let mut halting = strategy(3).with_listener(Box::new(history.clone()));

    halting.evaluate(&scored_network(0.75)).unwrap();
    halting.evaluate(&scored_network(0.25)).unwrap();

    assert_eq!(history.len(), 2);
    assert_eq!(history.series(VALIDATION_SET_PERCENT_WRONG), vec![0.75, 0.25]);
    assert_eq!(history.series(TRAINING_SET_PERCENT_WRONG), vec![0.75, 0.25]);
}
