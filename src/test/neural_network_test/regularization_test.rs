use super::*;

#[test]
fn l2_regularization_test() {
    let l2 = L2Regularization::new(0.5).unwrap();
    assert_eq!(l2.lambda(), 0.5);

    let mut weights = DenseMatrix::from_grid(&[[1.0, -2.0], [4.0, 0.0]]);
    l2.adjust_weights(&mut weights, 10, 0.1);
    assert_abs_diff_eq!(
        weights,
        DenseMatrix::from_grid(&[[0.995, -1.99], [3.98, 0.0]]),
        epsilon = 1e-12
    );
}

#[test]
fn l2_regularization_edge_cases_test() {
    let original = DenseMatrix::from_grid(&[[1.0, -2.0]]);

    let mut weights = original.clone();
    L2Regularization::new(0.5).unwrap().adjust_weights(&mut weights, 0, 0.1);
    assert_eq!(weights, original);

    let mut weights = original.clone();
    L2Regularization::new(0.0).unwrap().adjust_weights(&mut weights, 4, 0.1);
    assert_eq!(weights, original);

    assert!(L2Regularization::new(-1.0).is_err());
    assert!(L2Regularization::new(f64::INFINITY).is_err());
}
