use crate::classifiers::c45::attribute_selector::AttributeSelector;
use crate::classifiers::c45::split_model::SplitModel;
use crate::core::TreeError;
use crate::core::dataset::Dataset;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node of the gain-ratio tree. Leaves hold a no-split model whose class
/// distribution is the prediction; internal nodes own one child per outcome
/// of their split.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    model: SplitModel,
    children: Vec<TreeNode>,
    is_leaf: bool,
    /// Instances this node was built from, kept for pruning. Never persisted.
    #[serde(skip)]
    training: Option<Dataset>,
}

impl TreeNode {
    /// Grows a subtree over `instances` top-down.
    pub fn build(instances: Dataset) -> Result<Self, TreeError> {
        let model = AttributeSelector::new().select(&instances)?;

        if model.num_branches() == 1 {
            return Ok(Self {
                model,
                children: Vec::new(),
                is_leaf: true,
                training: Some(instances),
            });
        }

        let children = model
            .partition(&instances)
            .into_iter()
            .map(TreeNode::build)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            model,
            children,
            is_leaf: false,
            training: Some(instances),
        })
    }

    /// Class-probability vector for `instance`. A missing tested value sends
    /// the instance down every branch, each contribution scaled by the
    /// branch weight; the scaling compounds along the path.
    pub fn distribution(&self, instance: &dyn Instance) -> Vec<f64> {
        let mut out = vec![0.0; self.model.num_classes()];
        self.accumulate(instance, 1.0, &mut out);
        out
    }

    fn accumulate(&self, instance: &dyn Instance, weight: f64, out: &mut [f64]) {
        if self.is_leaf {
            for (slot, p) in out.iter_mut().zip(self.model.class_probabilities()) {
                *slot += weight * p;
            }
            return;
        }

        match self.model.test().branch_for_instance(instance) {
            Some(branch) => {
                if let Some(child) = self.children.get(branch) {
                    child.accumulate(instance, weight, out);
                }
            }
            None => {
                for (child, &share) in self.children.iter().zip(self.model.weights()) {
                    child.accumulate(instance, weight * share, out);
                }
            }
        }
    }

    /// Replaces the split with a no-split model over this node's training
    /// instances and drops the children.
    pub fn collapse_to_leaf(&mut self) -> Result<(), TreeError> {
        let training = self
            .training
            .as_ref()
            .ok_or(TreeError::TrainingDataUnavailable)?;
        self.model = SplitModel::no_split(training);
        self.children.clear();
        self.is_leaf = true;
        Ok(())
    }

    pub fn model(&self) -> &SplitModel {
        &self.model
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [TreeNode] {
        &mut self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    pub fn training(&self) -> Option<&Dataset> {
        self.training.as_ref()
    }

    pub fn num_leaves(&self) -> usize {
        if self.is_leaf {
            1
        } else {
            self.children.iter().map(TreeNode::num_leaves).sum()
        }
    }

    pub fn num_nodes(&self) -> usize {
        1 + self.children.iter().map(TreeNode::num_nodes).sum::<usize>()
    }

    /// Writes the subtree in the usual `attr = value` / `|  ` layout; each
    /// branch starts on a new line and leaves finish the line of their branch.
    pub(crate) fn write_tree(
        &self,
        f: &mut fmt::Formatter<'_>,
        header: &InstanceHeader,
        depth: usize,
    ) -> fmt::Result {
        if self.is_leaf {
            return write!(f, ": {}", self.leaf_summary(header));
        }

        for (branch, child) in self.children.iter().enumerate() {
            writeln!(f)?;
            write!(
                f,
                "{}{}",
                "|  ".repeat(depth),
                self.model.test().describe_branch(header, branch)
            )?;
            child.write_tree(f, header, depth + 1)?;
        }
        Ok(())
    }

    fn leaf_summary(&self, header: &InstanceHeader) -> String {
        let dominant = self.model.dominant_class();
        let total = self.model.total();
        let errors = total - self.model.class_distribution().get(dominant).copied().unwrap_or(0.0);
        let label = header.class_label(dominant);
        if errors > 0.0 {
            format!("{label} ({}/{})", format_weight(total), format_weight(errors))
        } else {
            format!("{label} ({})", format_weight(total))
        }
    }
}

/// Two decimals at most, always at least one.
fn format_weight(w: f64) -> String {
    let rounded = (w * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.1}")
    } else {
        format!("{rounded}")
    }
}
