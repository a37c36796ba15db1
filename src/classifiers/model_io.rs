use crate::classifiers::Classifier;
use crate::classifiers::c45::C45Tree;
use crate::classifiers::id3::Id3Tree;
use crate::classifiers::split_criteria::{
    GainRatioSplitCriterion, InfoGainSplitCriterion, SplitCriterion,
};
use crate::core::TreeError;
use crate::core::dataset::Dataset;
use crate::core::header_schema::HeaderSchema;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

/// One of the two tree learners, trained or not.
#[derive(Debug, Clone, Serialize, Deserialize, EnumDiscriminants)]
#[serde(tag = "type", content = "tree", rename_all = "kebab-case")]
#[strum_discriminants(name(TreeAlgorithm))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum TreeModel {
    #[strum_discriminants(strum(
        to_string = "c45",
        serialize = "j48",
        message = "C4.5 Tree",
        detailed_message = "Gain-ratio tree with numeric thresholds, missing values and pruning."
    ))]
    #[serde(rename = "c45")]
    C45(C45Tree),

    #[strum_discriminants(strum(
        message = "ID3 Tree",
        detailed_message = "Information-gain tree over nominal attributes only."
    ))]
    Id3(Id3Tree),
}

impl TreeModel {
    /// Untrained learner of the given kind. `prune` only affects C4.5.
    pub fn new(algorithm: TreeAlgorithm, prune: bool) -> Self {
        match algorithm {
            TreeAlgorithm::C45 => TreeModel::C45(C45Tree::with_pruning(prune)),
            TreeAlgorithm::Id3 => TreeModel::Id3(Id3Tree::new()),
        }
    }

    pub fn algorithm(&self) -> TreeAlgorithm {
        TreeAlgorithm::from(self)
    }

    /// Name of the measure the learner ranks candidate splits by.
    pub fn split_criterion(&self) -> &'static str {
        match self {
            TreeModel::C45(_) => GainRatioSplitCriterion::new().name(),
            TreeModel::Id3(_) => InfoGainSplitCriterion::new().name(),
        }
    }

    pub fn is_built(&self) -> bool {
        match self {
            TreeModel::C45(tree) => tree.root().is_some(),
            TreeModel::Id3(tree) => tree.root().is_some(),
        }
    }

    pub fn num_leaves(&self) -> usize {
        match self {
            TreeModel::C45(tree) => tree.num_leaves(),
            TreeModel::Id3(tree) => tree.num_leaves(),
        }
    }

    pub fn num_nodes(&self) -> usize {
        match self {
            TreeModel::C45(tree) => tree.num_nodes(),
            TreeModel::Id3(tree) => tree.num_nodes(),
        }
    }

    pub fn set_header(&mut self, header: Arc<InstanceHeader>) {
        match self {
            TreeModel::C45(tree) => tree.set_header(header),
            TreeModel::Id3(tree) => tree.set_header(header),
        }
    }
}

impl Classifier for TreeModel {
    fn train(&mut self, dataset: &Dataset) -> Result<(), TreeError> {
        match self {
            TreeModel::C45(tree) => tree.train(dataset),
            TreeModel::Id3(tree) => tree.train(dataset),
        }
    }

    fn class_probabilities(&self, instance: &dyn Instance) -> Result<Vec<f64>, TreeError> {
        match self {
            TreeModel::C45(tree) => tree.class_probabilities(instance),
            TreeModel::Id3(tree) => tree.class_probabilities(instance),
        }
    }
}

impl fmt::Display for TreeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeModel::C45(tree) => fmt::Display::fmt(tree, f),
            TreeModel::Id3(tree) => fmt::Display::fmt(tree, f),
        }
    }
}

/// A trained tree together with the header it was trained on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedModel {
    pub schema: HeaderSchema,
    pub model: TreeModel,
}

impl SavedModel {
    pub fn new(header: &InstanceHeader, model: TreeModel) -> Self {
        Self {
            schema: HeaderSchema::from(header),
            model,
        }
    }

    /// Fails when `header` differs from the training header in anything but
    /// the relation name.
    pub fn check_compatible(&self, header: &InstanceHeader) -> Result<(), TreeError> {
        if self.schema.is_compatible_with(&HeaderSchema::from(header)) {
            Ok(())
        } else {
            Err(TreeError::InvalidDataset(format!(
                "dataset '{}' does not match the model's training header '{}'",
                header.relation_name(),
                self.schema.relation
            )))
        }
    }
}

/// Writes `model` (which must be trained) as JSON.
pub fn save_model(
    path: impl AsRef<Path>,
    model: &TreeModel,
    header: &InstanceHeader,
) -> Result<(), TreeError> {
    if !model.is_built() {
        return Err(TreeError::NotBuilt);
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &SavedModel::new(header, model.clone()))?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Reads a model written by [`save_model`] and reattaches its header.
pub fn load_model(path: impl AsRef<Path>) -> Result<SavedModel, TreeError> {
    let reader = BufReader::new(File::open(path)?);
    let mut saved: SavedModel = serde_json::from_reader(reader)?;

    let header = saved.schema.clone().into_header();
    header.validate()?;
    saved.model.set_header(Arc::new(header));
    Ok(saved)
}
