/// Scores how much a candidate split of a class distribution is worth.
pub trait SplitCriterion {
    fn get_merit_of_split(
        &self,
        pre_split_distribution: &[f64],
        post_split_dists: &[Vec<f64>],
    ) -> f64;

    fn name(&self) -> &'static str;
}
