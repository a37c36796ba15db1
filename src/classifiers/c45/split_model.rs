use crate::classifiers::split_criteria::{
    GainRatioSplitCriterion, InfoGainSplitCriterion, SplitCriterion,
};
use crate::classifiers::split_test::SplitTest;
use crate::core::TreeError;
use crate::core::dataset::{Dataset, WeightedInstance};
use crate::utils::math::{approx_eq, max_index};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Class statistics of one candidate split (or of a leaf, for `NoSplit`).
///
/// `distribution[outcome][class]` holds the weight of the instances routed to
/// `outcome`; `weights[outcome]` is that outcome's share of the grand total
/// and doubles as the routing distribution for instances whose tested value
/// is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitModel {
    test: SplitTest,
    distribution: Vec<Vec<f64>>,
    class_distribution: Vec<f64>,
    value_distribution: Vec<f64>,
    weights: Vec<f64>,
    info_gain: f64,
    gain_ratio: f64,
}

impl SplitModel {
    /// Single-outcome model over every instance of `dataset`.
    pub fn no_split(dataset: &Dataset) -> Self {
        Self::from_distribution(SplitTest::NoSplit, vec![dataset.class_counts()])
    }

    /// Evaluates a split on `attribute_index`.
    ///
    /// Missing values at the attribute are imputed first (see
    /// [`impute_missing`]); the writes land in the instances' shared storage.
    pub fn build(dataset: &Dataset, attribute_index: usize) -> Result<Self, TreeError> {
        let header = dataset.header();
        if attribute_index >= header.number_of_attributes()
            || attribute_index == dataset.class_index()
        {
            return Err(TreeError::InvalidParameter(format!(
                "attribute {attribute_index} cannot be used as a split attribute"
            )));
        }

        impute_missing(dataset, attribute_index)?;

        let test = match header.nominal_attribute(attribute_index) {
            Some(nominal) => SplitTest::NominalMultiway {
                attribute_index,
                num_values: nominal.values.len(),
            },
            None => SplitTest::NumericBinary {
                attribute_index,
                threshold: find_threshold(dataset, attribute_index),
            },
        };

        let num_classes = dataset.number_of_classes();
        let mut distribution = vec![vec![0.0; num_classes]; test.max_branches()];
        for entry in dataset.iter() {
            let (Some(class), Some(branch)) = (
                entry.class_value(),
                test.branch_for_value(entry.value(attribute_index)),
            ) else {
                continue;
            };
            if class < num_classes {
                distribution[branch][class] += entry.weight();
            }
        }

        Ok(Self::from_distribution(test, distribution))
    }

    fn from_distribution(test: SplitTest, distribution: Vec<Vec<f64>>) -> Self {
        let num_classes = distribution.first().map_or(0, Vec::len);
        let mut class_distribution = vec![0.0; num_classes];
        for row in &distribution {
            for (c, w) in row.iter().enumerate() {
                class_distribution[c] += w;
            }
        }
        let value_distribution: Vec<f64> = distribution.iter().map(|r| r.iter().sum()).collect();

        let total: f64 = value_distribution.iter().sum();
        let weights = if approx_eq(total, 0.0) {
            vec![0.0; value_distribution.len()]
        } else {
            value_distribution.iter().map(|v| v / total).collect()
        };

        let info_gain =
            InfoGainSplitCriterion::new().get_merit_of_split(&class_distribution, &distribution);
        let gain_ratio =
            GainRatioSplitCriterion::new().get_merit_of_split(&class_distribution, &distribution);

        Self {
            test,
            distribution,
            class_distribution,
            value_distribution,
            weights,
            info_gain,
            gain_ratio,
        }
    }

    /// Splits `dataset` into one view per outcome. Instances whose tested
    /// value is missing go to every outcome with positive weight, their
    /// weight scaled by that outcome's share.
    pub fn partition(&self, dataset: &Dataset) -> Vec<Dataset> {
        let mut parts: Vec<Dataset> = (0..self.num_branches())
            .map(|_| dataset.empty_like())
            .collect();

        for entry in dataset.iter() {
            match self.branch_for_entry(entry) {
                Some(branch) => parts[branch].push_entry(entry.clone()),
                None => {
                    for (branch, &share) in self.weights.iter().enumerate() {
                        if share > 0.0 {
                            parts[branch].push_entry(entry.reweighted(entry.weight() * share));
                        }
                    }
                }
            }
        }
        parts
    }

    fn branch_for_entry(&self, entry: &WeightedInstance) -> Option<usize> {
        match self.test.attribute_index() {
            None => Some(0),
            Some(index) => self.test.branch_for_value(entry.value(index)),
        }
    }

    pub fn test(&self) -> &SplitTest {
        &self.test
    }

    pub fn is_no_split(&self) -> bool {
        matches!(self.test, SplitTest::NoSplit)
    }

    pub fn num_branches(&self) -> usize {
        self.test.max_branches()
    }

    pub fn num_classes(&self) -> usize {
        self.class_distribution.len()
    }

    pub fn distribution(&self) -> &[Vec<f64>] {
        &self.distribution
    }

    pub fn class_distribution(&self) -> &[f64] {
        &self.class_distribution
    }

    pub fn value_distribution(&self) -> &[f64] {
        &self.value_distribution
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn info_gain(&self) -> f64 {
        self.info_gain
    }

    pub fn gain_ratio(&self) -> f64 {
        self.gain_ratio
    }

    pub fn total(&self) -> f64 {
        self.class_distribution.iter().sum()
    }

    pub fn class_probability(&self, class_index: usize) -> f64 {
        let total = self.total();
        if approx_eq(total, 0.0) {
            return 0.0;
        }
        self.class_distribution
            .get(class_index)
            .map_or(0.0, |c| c / total)
    }

    pub fn class_probabilities(&self) -> Vec<f64> {
        (0..self.num_classes())
            .map(|c| self.class_probability(c))
            .collect()
    }

    /// Majority class; ties go to the lowest index.
    pub fn dominant_class(&self) -> usize {
        max_index(&self.class_distribution)
    }
}

/// Replaces each missing value at `attribute_index` with the weighted mode of
/// that attribute among instances of the same class. Instances whose class
/// never shows a value stay missing. Returns how many values were filled.
///
/// The instances are updated in place through their shared storage, so the
/// caller's dataset and every view derived from it observe the new values.
pub fn impute_missing(dataset: &Dataset, attribute_index: usize) -> Result<usize, TreeError> {
    if !dataset.iter().any(|e| e.is_missing(attribute_index)) {
        return Ok(0);
    }

    let modes = class_modes(dataset, attribute_index);
    let mut filled = 0;
    for entry in dataset.iter() {
        if !entry.is_missing(attribute_index) {
            continue;
        }
        if let Some(class) = entry.class_value()
            && let Some(&Some(mode)) = modes.get(class)
        {
            entry.set_value(attribute_index, mode)?;
            filled += 1;
        }
    }
    Ok(filled)
}

/// Per class, the most frequent (by weight) non-missing value of the
/// attribute. Ties go to the smallest value.
fn class_modes(dataset: &Dataset, attribute_index: usize) -> Vec<Option<f64>> {
    let mut tallies: Vec<HashMap<u64, (f64, f64)>> =
        vec![HashMap::new(); dataset.number_of_classes()];

    for entry in dataset.iter() {
        let value = entry.value(attribute_index);
        if value.is_nan() {
            continue;
        }
        let Some(tally) = entry.class_value().and_then(|c| tallies.get_mut(c)) else {
            continue;
        };
        // +0.0 folds -0.0 into 0.0
        let value = value + 0.0;
        tally.entry(value.to_bits()).or_insert((value, 0.0)).1 += entry.weight();
    }

    tallies
        .into_iter()
        .map(|tally| {
            let mut candidates: Vec<(f64, f64)> = tally.into_values().collect();
            candidates.sort_by(|a, b| a.0.total_cmp(&b.0));
            let mut best: Option<(f64, f64)> = None;
            for (value, weight) in candidates {
                if best.is_none_or(|(_, w)| weight > w) {
                    best = Some((value, weight));
                }
            }
            best.map(|(value, _)| value)
        })
        .collect()
}

/// Midpoint between the first two neighbouring values (in ascending order)
/// whose classes differ. `f64::MAX` when the class never changes, which puts
/// every instance below the threshold.
fn find_threshold(dataset: &Dataset, attribute_index: usize) -> f64 {
    let mut sorted: Vec<(f64, usize)> = dataset
        .iter()
        .filter_map(|e| {
            let value = e.value(attribute_index);
            if value.is_nan() {
                return None;
            }
            e.class_value().map(|class| (value, class))
        })
        .collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let mut previous: Option<(f64, usize)> = None;
    for &(value, class) in &sorted {
        if let Some((last_value, last_class)) = previous
            && class != last_class
        {
            return (value + last_value) / 2.0;
        }
        previous = Some((value, class));
    }
    f64::MAX
}
