use crate::classifiers::split_criteria::entropy::entropy;
use crate::classifiers::split_criteria::{InfoGainSplitCriterion, SplitCriterion};
use crate::classifiers::split_test::SplitTest;
use crate::core::TreeError;
use crate::core::dataset::Dataset;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use crate::utils::math::{gr, max_index, normalize};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Id3Node {
    /// An all-zero distribution marks a branch no training instance reached.
    Leaf { distribution: Vec<f64> },
    Split {
        test: SplitTest,
        children: Vec<Id3Node>,
    },
}

impl Id3Node {
    /// Grows a subtree over `instances`, splitting only on the attributes in
    /// `available`. Counts are unweighted.
    pub fn build(instances: &Dataset, available: &[usize]) -> Self {
        let num_classes = instances.number_of_classes();
        if instances.is_empty() {
            return Id3Node::Leaf {
                distribution: vec![0.0; num_classes],
            };
        }

        let counts = class_counts(instances, num_classes);
        if entropy(&counts) == 0.0 {
            let mut distribution = vec![0.0; num_classes];
            distribution[max_index(&counts)] = 1.0;
            return Id3Node::Leaf { distribution };
        }

        if available.is_empty() {
            let mut distribution = counts;
            normalize(&mut distribution);
            return Id3Node::Leaf { distribution };
        }

        let criterion = InfoGainSplitCriterion::new();
        let mut best: Option<(usize, f64, Vec<Dataset>)> = None;
        for &attribute_index in available {
            let subsets = split_on(instances, attribute_index);
            let post: Vec<Vec<f64>> = subsets
                .iter()
                .map(|s| class_counts(s, num_classes))
                .collect();
            let gain = criterion.get_merit_of_split(&counts, &post);
            if best.as_ref().is_none_or(|(_, g, _)| gr(gain, *g)) {
                best = Some((attribute_index, gain, subsets));
            }
        }

        let Some((attribute_index, _, subsets)) = best else {
            return Id3Node::Leaf {
                distribution: vec![0.0; num_classes],
            };
        };
        let remaining: Vec<usize> = available
            .iter()
            .copied()
            .filter(|&i| i != attribute_index)
            .collect();

        Id3Node::Split {
            test: SplitTest::NominalMultiway {
                attribute_index,
                num_values: subsets.len(),
            },
            children: subsets
                .iter()
                .map(|subset| Id3Node::build(subset, &remaining))
                .collect(),
        }
    }

    pub fn distribution(&self, instance: &dyn Instance) -> Result<Vec<f64>, TreeError> {
        match self {
            Id3Node::Leaf { distribution } => Ok(distribution.clone()),
            Id3Node::Split { test, children } => {
                let child = test
                    .branch_for_instance(instance)
                    .and_then(|b| children.get(b))
                    .ok_or_else(|| {
                        TreeError::UnsupportedFeature(
                            "ID3 cannot route an instance with a missing or unknown value"
                                .into(),
                        )
                    })?;
                child.distribution(instance)
            }
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Id3Node::Leaf { .. })
    }

    pub fn children(&self) -> &[Id3Node] {
        match self {
            Id3Node::Leaf { .. } => &[],
            Id3Node::Split { children, .. } => children,
        }
    }

    pub fn num_leaves(&self) -> usize {
        match self {
            Id3Node::Leaf { .. } => 1,
            Id3Node::Split { children, .. } => children.iter().map(Id3Node::num_leaves).sum(),
        }
    }

    pub fn num_nodes(&self) -> usize {
        1 + self.children().iter().map(Id3Node::num_nodes).sum::<usize>()
    }

    pub(crate) fn write_tree(
        &self,
        f: &mut fmt::Formatter<'_>,
        header: &InstanceHeader,
        depth: usize,
    ) -> fmt::Result {
        match self {
            Id3Node::Leaf { distribution } => {
                if distribution.iter().all(|&p| p == 0.0) {
                    write!(f, ": null")
                } else {
                    write!(f, ": {}", header.class_label(max_index(distribution)))
                }
            }
            Id3Node::Split { test, children } => {
                for (branch, child) in children.iter().enumerate() {
                    writeln!(f)?;
                    write!(
                        f,
                        "{}{}",
                        "|  ".repeat(depth),
                        test.describe_branch(header, branch)
                    )?;
                    child.write_tree(f, header, depth + 1)?;
                }
                Ok(())
            }
        }
    }
}

fn class_counts(instances: &Dataset, num_classes: usize) -> Vec<f64> {
    let mut counts = vec![0.0; num_classes];
    for entry in instances.iter() {
        if let Some(c) = entry.class_value()
            && c < num_classes
        {
            counts[c] += 1.0;
        }
    }
    counts
}

/// One view per declared value of the nominal attribute.
fn split_on(instances: &Dataset, attribute_index: usize) -> Vec<Dataset> {
    let num_values = instances
        .header()
        .nominal_values(attribute_index)
        .map_or(0, <[String]>::len);
    let mut subsets: Vec<Dataset> = (0..num_values).map(|_| instances.empty_like()).collect();
    for entry in instances.iter() {
        let value = entry.value(attribute_index);
        if value >= 0.0
            && let Some(subset) = subsets.get_mut(value as usize)
        {
            subset.push_entry(entry.clone());
        }
    }
    subsets
}
