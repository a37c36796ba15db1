use crate::classifiers::c45::split_model::SplitModel;
use crate::classifiers::c45::tree_node::TreeNode;
use crate::core::TreeError;
use crate::utils::math::{approx_eq, sm_or_eq};

/// How much worse (as a training-error fraction) a leaf may be than the
/// subtree it replaces.
pub const ERROR_THRESHOLD: f64 = 0.1;

/// Bottom-up reduced-error pruning over the training instances each node
/// remembers from the build.
#[derive(Debug, Clone, Copy)]
pub struct Pruner {
    threshold: f64,
}

impl Default for Pruner {
    fn default() -> Self {
        Self::new()
    }
}

impl Pruner {
    pub fn new() -> Self {
        Self {
            threshold: ERROR_THRESHOLD,
        }
    }

    pub fn with_threshold(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Prunes the children first, then collapses `node` when
    /// `leaf_error <= subtree_error + threshold`.
    pub fn prune(&self, node: &mut TreeNode) -> Result<(), TreeError> {
        if node.is_leaf() {
            return Ok(());
        }

        for child in node.children_mut() {
            self.prune(child)?;
        }

        let as_leaf = leaf_error(node)?;
        let as_subtree = subtree_error(node)?;
        if sm_or_eq(as_leaf, as_subtree + self.threshold) {
            node.collapse_to_leaf()?;
        }
        Ok(())
    }
}

/// Weighted fraction of the node's training instances that a majority-class
/// leaf would get wrong.
pub fn leaf_error(node: &TreeNode) -> Result<f64, TreeError> {
    let training = node.training().ok_or(TreeError::TrainingDataUnavailable)?;
    let leaf = SplitModel::no_split(training);
    let total = leaf.total();
    if approx_eq(total, 0.0) {
        return Ok(0.0);
    }

    let dominant = leaf.dominant_class();
    let incorrect: f64 = training
        .iter()
        .filter(|e| e.class_value().is_some_and(|c| c != dominant))
        .map(|e| e.weight())
        .sum();
    Ok(incorrect / total)
}

/// Leaf error for leaves, otherwise the sum over the children. The children's
/// fractions are added as they are, not scaled by their share of the node, so
/// a collapse can lose more training accuracy than the threshold suggests.
pub fn subtree_error(node: &TreeNode) -> Result<f64, TreeError> {
    if node.is_leaf() {
        leaf_error(node)
    } else {
        node.children().iter().map(subtree_error).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dataset::Dataset;
    use crate::core::instances::DenseInstance;
    use crate::testing::dummies::{
        a_predicts_class_dataset, two_nominal_header, weather_dataset, weather_header,
    };
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Arc;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn snapshot(node: &TreeNode) -> String {
        serde_json::to_string(node).unwrap()
    }

    /// Mostly class 0 with one flipped label; B carries the noise.
    fn noisy_dataset() -> Dataset {
        Dataset::from_rows(
            two_nominal_header(),
            vec![
                vec![0.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0],
                vec![1.0, 0.0, 0.0],
                vec![1.0, 1.0, 1.0],
            ],
        )
    }

    /// Weather-shaped rows with holes in the predictors and uneven weights.
    fn random_weather(rng: &mut StdRng, rows: usize) -> Dataset {
        let header = weather_header();
        let instances = (0..rows)
            .map(|_| {
                let mut values = vec![
                    rng.random_range(0..3) as f64,
                    rng.random_range(60..90) as f64,
                    rng.random_range(60..100) as f64,
                    rng.random_range(0..2) as f64,
                    rng.random_range(0..2) as f64,
                ];
                for v in values.iter_mut().take(4) {
                    if rng.random_bool(0.4) {
                        *v = f64::NAN;
                    }
                }
                DenseInstance::new(Arc::clone(&header), values, rng.random_range(0.5..2.0))
            })
            .collect();
        Dataset::from_instances(header, instances)
    }

    /// Walks the unpruned and pruned trees side by side. Every collapsed node
    /// must have met the rule against its already pruned children, and every
    /// surviving split must have failed it.
    fn assert_collapses_follow_rule(original: &TreeNode, pruned: &TreeNode, pruner: &Pruner) {
        if original.is_leaf() {
            assert!(pruned.is_leaf());
            return;
        }

        if pruned.is_leaf() {
            let mut node = original.clone();
            for child in node.children_mut() {
                pruner.prune(child).unwrap();
            }
            let as_leaf = leaf_error(&node).unwrap();
            let as_subtree = subtree_error(&node).unwrap();
            assert!(
                sm_or_eq(as_leaf, as_subtree + pruner.threshold()),
                "collapsed with leaf error {as_leaf} against subtree error {as_subtree}"
            );
            return;
        }

        let as_leaf = leaf_error(pruned).unwrap();
        let as_subtree = subtree_error(pruned).unwrap();
        assert!(!sm_or_eq(as_leaf, as_subtree + pruner.threshold()));
        assert_eq!(original.children().len(), pruned.children().len());
        for (o, p) in original.children().iter().zip(pruned.children()) {
            assert_collapses_follow_rule(o, p, pruner);
        }
    }

    #[test]
    fn every_collapse_is_within_threshold_of_its_subtree() {
        let mut rng = StdRng::seed_from_u64(23);
        for pruner in [Pruner::new(), Pruner::with_threshold(0.0)] {
            for _ in 0..40 {
                let original = TreeNode::build(random_weather(&mut rng, 40)).unwrap();
                let mut pruned = original.clone();
                pruner.prune(&mut pruned).unwrap();
                assert_collapses_follow_rule(&original, &pruned, &pruner);
            }
        }
    }

    #[test]
    fn pruning_never_grows_the_tree() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..40 {
            let original = TreeNode::build(random_weather(&mut rng, 40)).unwrap();
            let mut pruned = original.clone();
            Pruner::new().prune(&mut pruned).unwrap();
            assert!(pruned.num_nodes() <= original.num_nodes());
            assert!(pruned.num_leaves() <= original.num_leaves());
        }
    }

    #[test]
    fn leaf_error_is_the_minority_fraction() {
        let root = TreeNode::build(weather_dataset()).unwrap();
        assert!(approx_eq(leaf_error(&root).unwrap(), 5.0 / 14.0, 1e-12));
        assert_eq!(subtree_error(&root).unwrap(), 0.0);
    }

    #[test]
    fn informative_split_survives() {
        let mut root = TreeNode::build(a_predicts_class_dataset()).unwrap();
        Pruner::new().prune(&mut root).unwrap();
        assert!(!root.is_leaf());
        assert_eq!(root.num_leaves(), 2);
    }

    #[test]
    fn marginal_split_is_collapsed() {
        let mut root = TreeNode::build(noisy_dataset()).unwrap();
        assert!(!root.is_leaf());

        Pruner::new().prune(&mut root).unwrap();
        assert!(root.is_leaf());
        assert_eq!(root.model().dominant_class(), 0);
    }

    #[test]
    fn pruning_twice_changes_nothing() {
        for data in [weather_dataset(), noisy_dataset(), a_predicts_class_dataset()] {
            let mut root = TreeNode::build(data).unwrap();
            Pruner::new().prune(&mut root).unwrap();
            let once = snapshot(&root);
            Pruner::new().prune(&mut root).unwrap();
            assert_eq!(once, snapshot(&root));
        }
    }

    #[test]
    fn zero_threshold_keeps_more_structure() {
        let mut loose = TreeNode::build(noisy_dataset()).unwrap();
        let mut strict = loose.clone();
        Pruner::new().prune(&mut loose).unwrap();
        Pruner::with_threshold(0.0).prune(&mut strict).unwrap();
        assert!(strict.num_nodes() >= loose.num_nodes());
    }

    #[test]
    fn pruning_needs_training_instances() {
        let root = TreeNode::build(a_predicts_class_dataset()).unwrap();
        let mut restored: TreeNode = serde_json::from_str(&snapshot(&root)).unwrap();
        assert!(matches!(
            Pruner::new().prune(&mut restored),
            Err(TreeError::TrainingDataUnavailable)
        ));
    }
}
