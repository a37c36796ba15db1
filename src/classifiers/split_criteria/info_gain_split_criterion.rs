use crate::classifiers::split_criteria::entropy::information_gain;
use crate::classifiers::split_criteria::split_criterion::SplitCriterion;

/// Raw information gain, as used by ID3.
#[derive(Debug, Default, Clone, Copy)]
pub struct InfoGainSplitCriterion;

impl InfoGainSplitCriterion {
    pub fn new() -> Self {
        Self
    }
}

impl SplitCriterion for InfoGainSplitCriterion {
    fn get_merit_of_split(
        &self,
        pre_split_distribution: &[f64],
        post_split_dists: &[Vec<f64>],
    ) -> f64 {
        information_gain(pre_split_distribution, post_split_dists)
    }

    fn name(&self) -> &'static str {
        "info-gain"
    }
}
