//! Information-theoretic scores shared by both tree learners.

use crate::utils::math::approx_eq;

/// Shannon entropy (base 2) of a histogram. Empty or all-zero input has zero
/// entropy and zero-count cells contribute nothing.
pub fn entropy(counts: &[f64]) -> f64 {
    let total: f64 = counts.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }

    counts
        .iter()
        .filter(|&&c| c > 0.0)
        .map(|&c| {
            let p = c / total;
            -p * p.log2()
        })
        .sum()
}

/// Expected entropy reduction of splitting `pre_split_distribution` into the
/// outcome × class table `post_split_dists`. Outcome shares are taken over the
/// table's grand total.
pub fn information_gain(pre_split_distribution: &[f64], post_split_dists: &[Vec<f64>]) -> f64 {
    let outcome_totals: Vec<f64> = post_split_dists.iter().map(|d| d.iter().sum()).collect();
    let total: f64 = outcome_totals.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }

    let mut gain = entropy(pre_split_distribution);
    for (dist, outcome_total) in post_split_dists.iter().zip(&outcome_totals) {
        gain -= (outcome_total / total) * entropy(dist);
    }
    gain
}

/// Entropy of the outcome-size distribution induced by a split.
pub fn split_information(post_split_dists: &[Vec<f64>]) -> f64 {
    let outcome_totals: Vec<f64> = post_split_dists.iter().map(|d| d.iter().sum()).collect();
    entropy(&outcome_totals)
}

/// Gain normalised by split information; degenerate splits fall back to the
/// raw gain.
pub fn gain_ratio(info_gain: f64, split_info: f64) -> f64 {
    if approx_eq(split_info, 0.0) {
        info_gain
    } else {
        info_gain / split_info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn entropy_of_empty_or_zero_histogram_is_zero() {
        assert_eq!(entropy(&[]), 0.0);
        assert_eq!(entropy(&[0.0, 0.0, 0.0]), 0.0);
    }

    #[test]
    fn entropy_is_zero_for_a_pure_histogram() {
        assert_eq!(entropy(&[0.0, 7.0, 0.0]), 0.0);
        assert!(entropy(&[1.0, 7.0, 0.0]) > 0.0);
    }

    #[test]
    fn entropy_is_maximal_for_uniform_histograms() {
        for k in 2..6 {
            let uniform = vec![3.0; k];
            assert!(approx_eq(entropy(&uniform), (k as f64).log2(), 1e-12));

            let mut skewed = uniform.clone();
            skewed[0] += 1.0;
            assert!(entropy(&skewed) < (k as f64).log2());
        }
    }

    #[test]
    fn information_gain_of_perfect_split_equals_parent_entropy() {
        let pre = vec![2.0, 2.0];
        let post = vec![vec![2.0, 0.0], vec![0.0, 2.0]];
        assert!(approx_eq(information_gain(&pre, &post), 1.0, 1e-12));
        assert!(approx_eq(split_information(&post), 1.0, 1e-12));
    }

    #[test]
    fn information_gain_of_uninformative_split_is_zero() {
        let pre = vec![2.0, 2.0];
        let post = vec![vec![1.0, 1.0], vec![1.0, 1.0]];
        assert!(approx_eq(information_gain(&pre, &post), 0.0, 1e-12));
    }

    #[test]
    fn information_gain_of_empty_table_is_zero() {
        let post = vec![vec![0.0, 0.0], vec![0.0, 0.0]];
        assert_eq!(information_gain(&[0.0, 0.0], &post), 0.0);
    }

    #[test]
    fn information_gain_is_never_negative_on_random_tables() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let outcomes = rng.random_range(1..5);
            let classes = rng.random_range(1..4);
            let post: Vec<Vec<f64>> = (0..outcomes)
                .map(|_| {
                    (0..classes)
                        .map(|_| rng.random_range(0..6) as f64)
                        .collect()
                })
                .collect();
            let mut pre = vec![0.0; classes];
            for dist in &post {
                for (c, v) in dist.iter().enumerate() {
                    pre[c] += v;
                }
            }
            assert!(information_gain(&pre, &post) >= -1e-12);
        }
    }

    #[test]
    fn gain_ratio_falls_back_to_gain_without_split_information() {
        let post = vec![vec![3.0, 1.0], vec![0.0, 0.0]];
        let split_info = split_information(&post);
        assert_eq!(split_info, 0.0);
        assert_eq!(gain_ratio(0.42, split_info), 0.42);
        assert!(approx_eq(gain_ratio(0.5, 2.0), 0.25, 1e-12));
    }
}
