use super::*;

#[test]
fn sigmoid_function_test() {
    let input = DenseMatrix::from_grid(&[[-2.0, -1.0, 0.0, 1.0, 2.0]]);
    let output = Activation::Sigmoid.function(&input);
    let expected = DenseMatrix::from_grid(&[[0.1192, 0.2689, 0.5, 0.7311, 0.8808]]);
    assert_abs_diff_eq!(output, expected, epsilon = 1e-4);
}

#[test]
fn sigmoid_derivative_test() {
    // The derivative takes the sigmoid's output, not its input
    let output = DenseMatrix::from_grid(&[[-10.0, -2.0, 0.0, 0.5, 1.0]]);
    let derivative = Activation::Sigmoid.derivative(&output);
    assert_eq!(
        derivative,
        DenseMatrix::from_grid(&[[-110.0, -6.0, 0.0, 0.25, 0.0]])
    );
}

#[test]
fn relu_test() {
    let input = DenseMatrix::from_grid(&[[-2.0, -1.0, 0.0], [1.0, 2.0, 3.0]]);
    let output = Activation::ReLU.function(&input);
    assert_eq!(
        output,
        DenseMatrix::from_grid(&[[0.0, 0.0, 0.0], [1.0, 2.0, 3.0]])
    );

    let derivative = Activation::ReLU.derivative(&output);
    assert_eq!(
        derivative,
        DenseMatrix::from_grid(&[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]])
    );
}

#[test]
fn identity_test() {
    let input = DenseMatrix::from_grid(&[[-1.5, 0.0], [2.5, 7.0]]);
    assert_eq!(Activation::Identity.function(&input), input);
    assert_eq!(Activation::Identity.derivative(&input), DenseMatrix::ones(2, 2));
}

#[test]
fn softmax_test() {
    let input = DenseMatrix::from_grid(&[[3.0, 0.5, 0.0, -2.0, 1.7, -1.3]]);
    let output = Activation::Softmax.function(&input);
    let expected = DenseMatrix::from_grid(&[[
        0.7018970478761761,
        0.05761521820903455,
        0.034945396309813054,
        0.00472934510740423,
        0.1912892609829745,
        0.009523731514597518,
    ]]);
    println!("Softmax output: {}", output);
    assert_abs_diff_eq!(output, expected, epsilon = 1e-12);
    assert_eq!(Activation::Softmax.derivative(&output), DenseMatrix::ones(1, 6));
}

#[test]
fn softmax_rows_are_independent_test() {
    let input = DenseMatrix::from_grid(&[[1000.0, 1000.0], [0.0, 0.0], [-5.0, 5.0]]);
    let output = Activation::Softmax.function(&input);

    assert_abs_diff_eq!(output.get(0, 0), 0.5, epsilon = 1e-12);
    assert_abs_diff_eq!(output.get(1, 1), 0.5, epsilon = 1e-12);
    for sum in output.sum_rows().values() {
        assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-12);
    }
    assert!(output.get(2, 1) > output.get(2, 0));
}

#[test]
fn default_output_function_test() {
    assert_eq!(Activation::default_output_for(1), Activation::Identity);
    assert_eq!(Activation::default_output_for(3), Activation::Sigmoid);
    assert_eq!(Activation::default(), Activation::Sigmoid);
}

#[test]
fn activation_serde_test() {
    let json = serde_json::to_string(&Activation::ReLU).unwrap();
    assert_eq!(json, "\"ReLU\"");
    let parsed: Activation = serde_json::from_str("\"Softmax\"").unwrap();
    assert_eq!(parsed, Activation::Softmax);
}
