use crate::classifiers::split_criteria::entropy::{gain_ratio, information_gain, split_information};
use crate::classifiers::split_criteria::split_criterion::SplitCriterion;

/// Information gain normalised by split information, as used by the C4.5
/// learner.
#[derive(Debug, Default, Clone, Copy)]
pub struct GainRatioSplitCriterion;

impl GainRatioSplitCriterion {
    pub fn new() -> Self {
        Self
    }
}

impl SplitCriterion for GainRatioSplitCriterion {
    fn get_merit_of_split(
        &self,
        pre_split_distribution: &[f64],
        post_split_dists: &[Vec<f64>],
    ) -> f64 {
        let gain = information_gain(pre_split_distribution, post_split_dists);
        gain_ratio(gain, split_information(post_split_dists))
    }

    fn name(&self) -> &'static str {
        "gain-ratio"
    }
}
