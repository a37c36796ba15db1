use crate::classifiers::Classifier;
use crate::core::TreeError;
use crate::core::dataset::Dataset;
use crate::evaluation::Evaluation;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::sync::Arc;

/// Scores an already trained classifier on `dataset`.
pub fn evaluate_model<C: Classifier + ?Sized>(
    classifier: &C,
    dataset: &Dataset,
) -> Result<Evaluation, TreeError> {
    let mut evaluation = Evaluation::new(Arc::clone(dataset.header()));
    evaluation.evaluate_on(classifier, dataset)?;
    Ok(evaluation)
}

/// Trains on the first `round(n * percent / 100)` instances and tests on the
/// rest, in file order.
pub fn percentage_split<C, F>(
    mut factory: F,
    dataset: &Dataset,
    percent: f64,
) -> Result<Evaluation, TreeError>
where
    C: Classifier,
    F: FnMut() -> C,
{
    if !(percent > 0.0 && percent < 100.0) {
        return Err(TreeError::InvalidParameter(format!(
            "split percentage must lie strictly between 0 and 100, got {percent}"
        )));
    }

    let n = dataset.len();
    let n_train = ((n as f64) * percent / 100.0).round() as usize;
    let train_idx: Vec<usize> = (0..n_train).collect();
    let test_idx: Vec<usize> = (n_train..n).collect();

    let mut classifier = factory();
    classifier.train(&dataset.select(&train_idx).deep_copy())?;
    evaluate_model(&classifier, &dataset.select(&test_idx).deep_copy())
}

/// Stratification-free k-fold cross-validation.
///
/// The instance order is shuffled with `seed`, then cut into `folds`
/// contiguous blocks; the first `n % folds` blocks hold one extra instance.
/// Every fold trains a fresh classifier on deep copies, so nothing one fold
/// does to its training data is visible to another.
pub fn cross_validate<C, F>(
    mut factory: F,
    dataset: &Dataset,
    folds: usize,
    seed: u64,
) -> Result<Evaluation, TreeError>
where
    C: Classifier,
    F: FnMut() -> C,
{
    let n = dataset.len();
    if folds < 2 {
        return Err(TreeError::InvalidParameter(format!(
            "cross-validation needs at least 2 folds, got {folds}"
        )));
    }
    if folds > n {
        return Err(TreeError::InvalidParameter(format!(
            "{folds} folds requested for only {n} instances"
        )));
    }

    let mut order: Vec<usize> = (0..n).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);

    let mut evaluation = Evaluation::new(Arc::clone(dataset.header()));
    let base = n / folds;
    let extra = n % folds;
    let mut start = 0;
    for fold in 0..folds {
        let end = start + base + usize::from(fold < extra);

        let test_idx = &order[start..end];
        let train_idx: Vec<usize> = order[..start]
            .iter()
            .chain(&order[end..])
            .copied()
            .collect();

        let mut classifier = factory();
        classifier.train(&dataset.select(&train_idx).deep_copy())?;
        evaluation.evaluate_on(&classifier, &dataset.select(test_idx).deep_copy())?;

        start = end;
    }

    Ok(evaluation)
}
