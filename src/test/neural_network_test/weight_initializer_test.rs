use super::*;

#[test]
fn uniform_initializer_test() {
    let mut rng = StdRng::seed_from_u64(9);
    let initializer = UniformWeightInitializer::new(-0.8, 0.8).unwrap();
    assert_eq!(initializer.min(), -0.8);
    assert_eq!(initializer.max(), 0.8);

    let mut weights = DenseMatrix::zeros(20, 20);
    initializer.initialize(&mut weights, &mut rng);

    let values = weights.values();
    assert!(values.iter().all(|w| (-0.8..0.8).contains(w)));
    assert!(values.iter().any(|&w| w < 0.0));
    assert!(values.iter().any(|&w| w > 0.0));
}

#[test]
fn uniform_initializer_is_seeded_test() {
    let initializer = UniformWeightInitializer::default();
    let mut first = DenseMatrix::zeros(4, 4);
    let mut second = DenseMatrix::zeros(4, 4);
    initializer.initialize(&mut first, &mut StdRng::seed_from_u64(3));
    initializer.initialize(&mut second, &mut StdRng::seed_from_u64(3));
    assert_eq!(first, second);
    assert!(first.values().iter().all(|w| w.abs() <= 0.04));
}

#[test]
fn constant_initializer_test() {
    let mut weights = DenseMatrix::zeros(2, 3);
    ConstantWeightInitializer(1.5).initialize(&mut weights, &mut StdRng::seed_from_u64(0));
    assert_eq!(weights, DenseMatrix::filled(2, 3, 1.5));
}

#[test]
fn invalid_range_test() {
    assert!(matches!(
        UniformWeightInitializer::new(0.5, 0.5),
        Err(ModelError::ConfigurationError(_))
    ));
    assert!(UniformWeightInitializer::new(1.0, -1.0).is_err());
    assert!(UniformWeightInitializer::new(f64::NEG_INFINITY, 0.0).is_err());
}
