use crate::classifiers::c45::split_model::SplitModel;
use crate::core::TreeError;
use crate::core::dataset::Dataset;
use crate::utils::math::gr;

/// Best-split search of the gain-ratio learner.
#[derive(Debug, Default, Clone, Copy)]
pub struct AttributeSelector;

impl AttributeSelector {
    pub fn new() -> Self {
        Self
    }

    /// Builds a [`SplitModel`] for every predictor and keeps the one with the
    /// greatest gain ratio (first attribute wins ties). Falls back to a
    /// no-split model when the dataset carries no weight or no attribute
    /// scores strictly above zero.
    pub fn select(&self, dataset: &Dataset) -> Result<SplitModel, TreeError> {
        if dataset.is_empty() || dataset.total_weight() <= 0.0 {
            return Ok(SplitModel::no_split(dataset));
        }

        let mut best: Option<SplitModel> = None;
        let mut best_ratio = 0.0;
        for attribute_index in dataset.header().predictor_indices() {
            let model = SplitModel::build(dataset, attribute_index)?;
            if gr(model.gain_ratio(), best_ratio) {
                best_ratio = model.gain_ratio();
                best = Some(model);
            }
        }

        Ok(best.unwrap_or_else(|| SplitModel::no_split(dataset)))
    }
}
