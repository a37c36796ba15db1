use crate::core::TreeError;
use crate::core::dataset::Dataset;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Bootstrap sample: `round(n * percent / 100)` draws with replacement.
///
/// The result owns fresh copies of the drawn instances, so a row drawn twice
/// appears as two independent instances. Percentages above 100 grow the data.
pub fn resample(dataset: &Dataset, percent: f64, seed: u64) -> Result<Dataset, TreeError> {
    if !(percent > 0.0 && percent.is_finite()) {
        return Err(TreeError::InvalidParameter(format!(
            "sample size percentage must be positive, got {percent}"
        )));
    }

    let n = dataset.len();
    if n == 0 {
        return Ok(dataset.empty_like());
    }

    let size = ((n as f64) * percent / 100.0).round() as usize;
    let mut rng = StdRng::seed_from_u64(seed);
    let picks: Vec<usize> = (0..size).map(|_| rng.random_range(0..n)).collect();
    Ok(dataset.select(&picks).deep_copy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::weather_dataset;
    use std::rc::Rc;

    #[test]
    fn sample_size_follows_percentage() {
        let data = weather_dataset();
        assert_eq!(resample(&data, 100.0, 1).unwrap().len(), 14);
        assert_eq!(resample(&data, 50.0, 1).unwrap().len(), 7);
        assert_eq!(resample(&data, 200.0, 1).unwrap().len(), 28);
        assert_eq!(resample(&data, 10.0, 1).unwrap().len(), 1);
    }

    #[test]
    fn same_seed_same_sample() {
        let data = weather_dataset();
        let rows = |d: &Dataset| -> Vec<Vec<f64>> {
            d.iter().map(|e| e.instance().values.clone()).collect()
        };
        let a = resample(&data, 100.0, 42).unwrap();
        let b = resample(&data, 100.0, 42).unwrap();
        assert_eq!(rows(&a), rows(&b));
    }

    #[test]
    fn sample_is_detached_from_the_source() {
        let data = weather_dataset();
        let sample = resample(&data, 100.0, 3).unwrap();
        for entry in sample.iter() {
            assert!(data.iter().all(|e| !Rc::ptr_eq(e.shared(), entry.shared())));
            assert_eq!(entry.weight(), 1.0);
        }
        assert!(sample.validate().is_ok());
    }

    #[test]
    fn non_positive_percentage_is_rejected() {
        let data = weather_dataset();
        for percent in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                resample(&data, percent, 1),
                Err(TreeError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn empty_input_gives_empty_sample() {
        let data = weather_dataset().empty_like();
        assert!(resample(&data, 100.0, 1).unwrap().is_empty());
    }
}
