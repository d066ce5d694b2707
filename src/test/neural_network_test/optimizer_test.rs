use super::*;

fn gradient() -> DenseMatrix {
    DenseMatrix::from_grid(&[[0.1, -0.2], [0.2, -0.1]])
}

#[test]
fn fixed_learning_rate_test() {
    let mut optimizer = FixedLearningRate::new(0.5).unwrap();
    assert_eq!(optimizer.learning_rate(), 0.5);

    let gradients = vec![gradient(), DenseMatrix::from_column(&[2.0, -4.0])];
    let corrections = optimizer.calc_corrections(&gradients).unwrap();
    assert_eq!(corrections[0], DenseMatrix::from_grid(&[[0.05, -0.1], [0.1, -0.05]]));
    assert_eq!(corrections[1], DenseMatrix::from_column(&[1.0, -2.0]));

    // stateless: the same gradients give the same corrections
    assert_eq!(optimizer.calc_corrections(&gradients).unwrap(), corrections);
}

#[test]
fn momentum_test() {
    let mut optimizer = Momentum::new(0.1, 0.5).unwrap();
    assert_eq!(optimizer.learning_rate(), 0.1);
    assert_eq!(optimizer.momentum(), 0.5);

    let first = optimizer.calc_corrections(&[gradient()]).unwrap();
    assert_abs_diff_eq!(
        first[0],
        DenseMatrix::from_grid(&[[0.01, -0.02], [0.02, -0.01]]),
        epsilon = 1e-12
    );

    let second = optimizer.calc_corrections(&[gradient()]).unwrap();
    assert_abs_diff_eq!(
        second[0],
        DenseMatrix::from_grid(&[[0.015, -0.03], [0.03, -0.015]]),
        epsilon = 1e-12
    );

    let third = optimizer.calc_corrections(&[gradient()]).unwrap();
    assert_abs_diff_eq!(third[0].get(0, 0), 0.0175, epsilon = 1e-12);
}

#[test]
fn momentum_history_mismatch_test() {
    let mut optimizer = Momentum::new(0.1, 0.5).unwrap();
    optimizer.calc_corrections(&[gradient()]).unwrap();

    let result = optimizer.calc_corrections(&[gradient(), gradient()]);
    assert!(matches!(result, Err(ModelError::InputValidationError(_))));

    let result = optimizer.calc_corrections(&[DenseMatrix::zeros(3, 3)]);
    assert!(matches!(result, Err(ModelError::ShapeMismatch { .. })));
}

#[test]
fn optimizer_validation_test() {
    assert!(FixedLearningRate::new(0.0).is_err());
    assert!(FixedLearningRate::new(-0.1).is_err());
    assert!(FixedLearningRate::new(f64::NAN).is_err());

    assert!(Momentum::new(0.1, 1.0).is_err());
    assert!(Momentum::new(0.1, -0.5).is_err());
    assert!(Momentum::new(0.0, 0.5).is_err());
    assert!(Momentum::new(0.1, 0.0).is_ok());
}
