use super::*;

/// `num_rows` rows whose only feature and label both equal the row index.
fn indexed_dataset(num_rows: usize) -> Dataset {
    let values: Vec<f64> = (0..num_rows).map(|i| i as f64).collect();
    Dataset::labeled(
        DenseMatrix::from_column(&values),
        DenseMatrix::from_column(&values),
    )
    .unwrap()
}

fn collect_labels(batches: BatchedDataset) -> Vec<f64> {
    let mut labels: Vec<f64> = batches
        .flat_map(|batch| batch.labels().unwrap().values())
        .collect();
    labels.sort_by(|a, b| a.partial_cmp(b).unwrap());
    labels
}

#[test]
fn batch_count_test() {
    let expected = [3, 3, 3, 3, 4, 4, 4, 4, 4];
    let mut rng = StdRng::seed_from_u64(17);

    for (num_rows, &expected_batches) in (24..=32).zip(expected.iter()) {
        let dataset = indexed_dataset(num_rows);
        let batches = BatchedDataset::new(&dataset, 8, &mut rng).unwrap();
        assert_eq!(batches.size(), expected_batches, "{} rows", num_rows);
        assert_eq!(batches.len(), expected_batches);

        let sizes: Vec<usize> = BatchedDataset::new(&dataset, 8, &mut rng)
            .unwrap()
            .map(|batch| batch.num_rows())
            .collect();
        let largest = *sizes.iter().max().unwrap();
        let smallest = *sizes.iter().min().unwrap();
        assert!(largest - smallest <= 1, "{} rows gave {:?}", num_rows, sizes);
        assert_eq!(sizes.iter().sum::<usize>(), num_rows);

        // every row exactly once
        let labels = collect_labels(batches);
        let all: Vec<f64> = (0..num_rows).map(|i| i as f64).collect();
        assert_eq!(labels, all);
    }
}

#[test]
fn extra_rows_go_to_first_batches_test() {
    let mut rng = StdRng::seed_from_u64(4);
    let sizes: Vec<usize> = BatchedDataset::new(&indexed_dataset(10), 3, &mut rng)
        .unwrap()
        .map(|batch| batch.num_rows())
        .collect();
    assert_eq!(sizes, vec![4, 3, 3]);
}

#[test]
fn small_and_empty_datasets_test() {
    let mut rng = StdRng::seed_from_u64(4);

    let batches = BatchedDataset::new(&indexed_dataset(3), 10, &mut rng).unwrap();
    assert_eq!(batches.size(), 1);

    let batches = BatchedDataset::new(&indexed_dataset(0), 10, &mut rng).unwrap();
    assert_eq!(batches.size(), 0);
    assert_eq!(batches.count(), 0);

    assert!(matches!(
        BatchedDataset::new(&indexed_dataset(5), 0, &mut rng),
        Err(ModelError::InputValidationError(_))
    ));
}

#[test]
fn batches_keep_rows_paired_test() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut batching = FixedSizeBatching::new(4).unwrap();
    assert_eq!(batching.batch_size(), 4);

    let batches = batching.batched_dataset(&indexed_dataset(20), &mut rng).unwrap();
    assert_eq!(batches.size(), 5);
    for batch in batches {
        assert_eq!(batch.features(), batch.labels().unwrap());
    }
    assert!(FixedSizeBatching::new(0).is_err());
}

#[test]
fn full_batching_test() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut batching = FullBatching::new();

    let mut batches = batching.batched_dataset(&indexed_dataset(13), &mut rng).unwrap();
    assert_eq!(batches.size(), 1);
    assert_eq!(batches.next().unwrap().num_rows(), 13);
    assert!(batches.next().is_none());

    let batches = batching.batched_dataset(&indexed_dataset(0), &mut rng).unwrap();
    assert_eq!(batches.size(), 0);
}

#[test]
fn gaussian_noise_statistics_test() {
    let num_rows = 1000;
    let num_cols = 100;
    let mut features = DenseMatrix::zeros(num_rows, num_cols);
    for row in 0..num_rows {
        for col in 0..num_cols {
            features.set(row, col, if (row + col) % 2 == 0 { 2.0 } else { 4.0 });
        }
    }
    let labels: Vec<f64> = (0..num_rows).map(|i| i as f64).collect();
    let dataset = Dataset::labeled(features, DenseMatrix::from_column(&labels)).unwrap();

    let mut batching = GaussianNoiseBatching::new(num_rows, 1.0, &dataset).unwrap();
    assert_eq!(batching.batch_size(), num_rows);
    assert_eq!(batching.probability(), 1.0);

    let mut rng = StdRng::seed_from_u64(99);
    let mut batches = batching.batched_dataset(&dataset, &mut rng).unwrap();
    assert_eq!(batches.size(), 1);
    let noisy = batches.next().unwrap();

    // every column is N(3, ~1), so the noisy values are no longer just 2s and 4s
    let values = noisy.features().values();
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    println!("Noisy mean {:.4}, std {:.4}", mean, variance.sqrt());
    assert_abs_diff_eq!(mean, 3.0, epsilon = 0.02);
    assert_abs_diff_eq!(variance.sqrt(), 1.0, epsilon = 0.05);
    assert!(values.iter().any(|&v| v != 2.0 && v != 4.0));

    // labels are shuffled with their rows but never altered
    let mut noisy_labels = noisy.labels().unwrap().values();
    noisy_labels.sort_by(|a, b| a.partial_cmp(b).unwrap());
    assert_eq!(noisy_labels, labels);

    // the source dataset is untouched
    assert_eq!(dataset.features().get(0, 0), 2.0);
    assert_eq!(dataset.features().get(0, 1), 4.0);
}

#[test]
fn gaussian_noise_column_statistics_test() {
    let reference = Dataset::unlabeled(DenseMatrix::from_grid(&[
        [1.0, 10.0, 7.0],
        [2.0, 10.0, 7.0],
        [3.0, 20.0, 7.0],
        [4.0, 20.0, 7.0],
    ]));
    let batching = GaussianNoiseBatching::new(2, 0.5, &reference).unwrap();
    let distributions = batching.feature_distributions();
    assert_eq!(distributions.len(), 3);

    // sample standard deviation, n - 1 in the denominator
    let expected = [(2.5, (5.0f64 / 3.0).sqrt()), (15.0, (100.0f64 / 3.0).sqrt()), (7.0, 0.0)];
    for (distribution, (mean, std_dev)) in distributions.iter().zip(expected) {
        println!("mean {:.4}, std {:.4}", distribution.mean(), distribution.std_dev());
        assert_abs_diff_eq!(distribution.mean(), mean, epsilon = 1e-12);
        assert_abs_diff_eq!(distribution.std_dev(), std_dev, epsilon = 1e-12);
    }
}

#[test]
fn gaussian_noise_probability_zero_test() {
    let dataset = indexed_dataset(20);
    let mut batching = GaussianNoiseBatching::new(5, 0.0, &dataset).unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    let batches = batching.batched_dataset(&dataset, &mut rng).unwrap();
    assert_eq!(batches.size(), 4);
    for batch in batches {
        assert_eq!(batch.features(), batch.labels().unwrap());
    }
}

#[test]
fn gaussian_noise_single_row_reference_test() {
    // one reference row gives a zero standard deviation, so noise equals the mean
    let reference = Dataset::unlabeled(DenseMatrix::from_grid(&[[5.0, -1.0]]));
    let training = Dataset::labeled(
        DenseMatrix::from_grid(&[[0.0, 0.0], [1.0, 1.0], [2.0, 2.0]]),
        DenseMatrix::from_column(&[0.0, 1.0, 2.0]),
    )
    .unwrap();

    let mut batching = GaussianNoiseBatching::new(3, 1.0, &reference).unwrap();
    let mut rng = StdRng::seed_from_u64(1);
    let batch = batching
        .batched_dataset(&training, &mut rng)
        .unwrap()
        .next()
        .unwrap();

    assert_eq!(
        batch.features(),
        &DenseMatrix::from_grid(&[[5.0, -1.0], [5.0, -1.0], [5.0, -1.0]])
    );
}

#[test]
fn gaussian_noise_validation_test() {
    let dataset = indexed_dataset(10);
    assert!(GaussianNoiseBatching::new(0, 0.5, &dataset).is_err());
    assert!(GaussianNoiseBatching::new(5, 1.5, &dataset).is_err());
    assert!(GaussianNoiseBatching::new(5, -0.1, &dataset).is_err());

    let mut batching = GaussianNoiseBatching::new(5, 0.5, &dataset).unwrap();
    let wider = Dataset::unlabeled(DenseMatrix::zeros(4, 3));
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(
        batching.batched_dataset(&wider, &mut rng),
        Err(ModelError::ShapeMismatch { .. })
    ));
}
