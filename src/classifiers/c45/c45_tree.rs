use crate::classifiers::Classifier;
use crate::classifiers::c45::pruner::Pruner;
use crate::classifiers::c45::tree_node::TreeNode;
use crate::core::TreeError;
use crate::core::dataset::Dataset;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Gain-ratio decision tree with numeric thresholds, missing-value handling
/// and optional reduced-error pruning.
///
/// Training imputes missing attribute values in place: the caller's dataset
/// shares instance storage with the tree and sees the filled-in values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct C45Tree {
    prune: bool,
    root: Option<TreeNode>,
    #[serde(skip)]
    header: Option<Arc<InstanceHeader>>,
}

impl Default for C45Tree {
    fn default() -> Self {
        Self::new()
    }
}

impl C45Tree {
    pub fn new() -> Self {
        Self::with_pruning(true)
    }

    pub fn without_pruning() -> Self {
        Self::with_pruning(false)
    }

    pub fn with_pruning(prune: bool) -> Self {
        Self {
            prune,
            root: None,
            header: None,
        }
    }

    pub fn prunes(&self) -> bool {
        self.prune
    }

    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    pub fn header(&self) -> Option<&Arc<InstanceHeader>> {
        self.header.as_ref()
    }

    /// Attaches the header used for rendering; needed after deserialising.
    pub fn set_header(&mut self, header: Arc<InstanceHeader>) {
        self.header = Some(header);
    }

    /// Runs the pruning pass on the built tree.
    pub fn prune(&mut self) -> Result<(), TreeError> {
        let root = self.root.as_mut().ok_or(TreeError::NotBuilt)?;
        if root.training().is_none() {
            return Err(TreeError::TrainingDataUnavailable);
        }
        Pruner::new().prune(root)
    }

    pub fn num_leaves(&self) -> usize {
        self.root.as_ref().map_or(0, TreeNode::num_leaves)
    }

    pub fn num_nodes(&self) -> usize {
        self.root.as_ref().map_or(0, TreeNode::num_nodes)
    }
}

impl Classifier for C45Tree {
    fn train(&mut self, dataset: &Dataset) -> Result<(), TreeError> {
        dataset.validate()?;

        self.root = Some(TreeNode::build(dataset.without_missing_class())?);
        self.header = Some(Arc::clone(dataset.header()));

        if self.prune {
            self.prune()?;
        }
        Ok(())
    }

    fn class_probabilities(&self, instance: &dyn Instance) -> Result<Vec<f64>, TreeError> {
        let root = self.root.as_ref().ok_or(TreeError::NotBuilt)?;
        Ok(root.distribution(instance))
    }
}

impl fmt::Display for C45Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = &self.root else {
            return writeln!(f, "No model built yet.");
        };

        let title = if self.prune {
            "C4.5 pruned tree"
        } else {
            "C4.5 unpruned tree"
        };
        writeln!(f, "{title}")?;
        writeln!(f, "{}", "-".repeat(title.len()))?;

        match &self.header {
            Some(header) => root.write_tree(f, header, 0)?,
            None => write!(f, "(attribute names unavailable)")?,
        }

        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "Number of Leaves  : \t{}", self.num_leaves())?;
        writeln!(f)?;
        writeln!(f, "Size of the tree : \t{}", self.num_nodes())
    }
}
