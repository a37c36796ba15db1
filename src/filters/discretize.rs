use crate::core::TreeError;
use crate::core::attributes::{AttributeRef, NominalAttribute};
use crate::core::dataset::Dataset;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::DenseInstance;
use std::sync::Arc;

/// Equal-width cut points for one numeric attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct EqualWidthBins {
    cut_points: Vec<f64>,
}

impl EqualWidthBins {
    /// Cuts `[min, max]` of the non-missing `values` into `bins` ranges.
    /// Fewer than two distinct values give a single catch-all bin.
    pub fn fit(values: impl IntoIterator<Item = f64>, bins: usize) -> Self {
        let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
        for v in values.into_iter().filter(|v| !v.is_nan()) {
            min = min.min(v);
            max = max.max(v);
        }

        let mut cut_points = Vec::new();
        if bins > 1 && max > min {
            let width = (max - min) / bins as f64;
            cut_points = (1..bins).map(|i| min + width * i as f64).collect();
        }
        Self { cut_points }
    }

    pub fn cut_points(&self) -> &[f64] {
        &self.cut_points
    }

    pub fn number_of_bins(&self) -> usize {
        self.cut_points.len() + 1
    }

    /// Index of the range holding `value`; upper bounds are inclusive.
    pub fn bin_of(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            return None;
        }
        Some(
            self.cut_points
                .iter()
                .position(|&cut| value <= cut)
                .unwrap_or(self.cut_points.len()),
        )
    }

    pub fn labels(&self) -> Vec<String> {
        let cuts = &self.cut_points;
        if cuts.is_empty() {
            return vec!["All".to_string()];
        }
        let mut labels = Vec::with_capacity(cuts.len() + 1);
        labels.push(format!("(-inf-{}]", fmt_cut(cuts[0])));
        for pair in cuts.windows(2) {
            labels.push(format!("({}-{}]", fmt_cut(pair[0]), fmt_cut(pair[1])));
        }
        labels.push(format!("({}-inf)", fmt_cut(cuts[cuts.len() - 1])));
        labels
    }
}

/// At most six decimals, trailing zeros dropped.
fn fmt_cut(v: f64) -> String {
    let s = format!("{v:.6}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".into() } else { s.into() }
}

/// Replaces every numeric non-class attribute by a nominal one with `bins`
/// equal-width ranges. Missing values stay missing. The result has its own
/// header and owns copies of the instances.
pub fn discretize(dataset: &Dataset, bins: usize) -> Result<Dataset, TreeError> {
    if bins < 1 {
        return Err(TreeError::InvalidParameter(
            "number of bins must be at least 1".into(),
        ));
    }

    let header = dataset.header();
    let binnings: Vec<Option<EqualWidthBins>> = (0..header.number_of_attributes())
        .map(|i| {
            let numeric = i != header.class_index() && !header.is_nominal(i);
            numeric.then(|| EqualWidthBins::fit(dataset.iter().map(|e| e.value(i)), bins))
        })
        .collect();

    let attributes: Vec<AttributeRef> = header
        .attributes
        .iter()
        .zip(&binnings)
        .map(|(attr, binning)| match binning {
            Some(b) => Arc::new(NominalAttribute::from_labels(attr.name(), b.labels())) as AttributeRef,
            None => Arc::clone(attr),
        })
        .collect();
    let new_header = Arc::new(InstanceHeader::new(
        header.relation_name().to_string(),
        attributes,
        header.class_index(),
    ));

    let mut out = Dataset::new(Arc::clone(&new_header));
    for entry in dataset.iter() {
        let values = entry
            .instance()
            .values
            .iter()
            .zip(&binnings)
            .map(|(&v, binning)| match binning {
                Some(b) => b.bin_of(v).map_or(f64::NAN, |bin| bin as f64),
                None => v,
            })
            .collect();
        out.push(DenseInstance::new(
            Arc::clone(&new_header),
            values,
            entry.weight(),
        ));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::{Classifier, Id3Tree};
    use crate::testing::dummies::{numeric_boundary_dataset, weather_dataset};

    #[test]
    fn three_bins_over_one_to_four() {
        let bins = EqualWidthBins::fit([1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(bins.cut_points(), &[2.0, 3.0]);
        assert_eq!(bins.labels(), vec!["(-inf-2]", "(2-3]", "(3-inf)"]);
        assert_eq!(bins.bin_of(2.0), Some(0));
        assert_eq!(bins.bin_of(2.5), Some(1));
        assert_eq!(bins.bin_of(9.0), Some(2));
        assert_eq!(bins.bin_of(f64::NAN), None);
    }

    #[test]
    fn constant_or_missing_columns_get_one_bin() {
        let constant = EqualWidthBins::fit([5.0, 5.0], 4);
        assert_eq!(constant.labels(), vec!["All"]);
        let missing = EqualWidthBins::fit([f64::NAN], 4);
        assert_eq!(missing.number_of_bins(), 1);
        assert_eq!(missing.bin_of(1.0), Some(0));
    }

    #[test]
    fn cut_points_are_printed_compactly() {
        assert_eq!(fmt_cut(71.0), "71");
        assert_eq!(fmt_cut(1.0 / 3.0), "0.333333");
        assert_eq!(fmt_cut(-2.5), "-2.5");
    }

    #[test]
    fn numeric_predictors_become_nominal() {
        let data = numeric_boundary_dataset();
        let out = discretize(&data, 3).unwrap();

        let h = out.header();
        assert!(h.is_nominal(0));
        assert_eq!(h.nominal_values(0).unwrap(), &["(-inf-2]", "(2-3]", "(3-inf)"]);
        assert_eq!(h.class_index(), 1);
        let column: Vec<f64> = out.iter().map(|e| e.value(0)).collect();
        assert_eq!(column, vec![0.0, 0.0, 1.0, 2.0]);
        assert!(out.validate().is_ok());
    }

    #[test]
    fn nominal_and_missing_values_are_kept() {
        let data = weather_dataset();
        data.entries()[3].set_value(1, f64::NAN).unwrap();
        let out = discretize(&data, 1).unwrap();

        assert_eq!(out.header().nominal_values(1).unwrap(), &["All"]);
        assert!(out.entries()[3].is_missing(1));
        assert_eq!(out.entries()[0].value(2), 0.0);
        assert_eq!(out.entries()[0].value(0), data.entries()[0].value(0));
        assert_eq!(out.entries()[0].class_value(), data.entries()[0].class_value());
    }

    #[test]
    fn discretized_weather_is_accepted_by_id3() {
        let out = discretize(&weather_dataset(), 3).unwrap();
        let mut tree = Id3Tree::new();
        assert!(tree.train(&out).is_ok());
    }

    #[test]
    fn zero_bins_is_rejected() {
        assert!(matches!(
            discretize(&weather_dataset(), 0),
            Err(TreeError::InvalidParameter(_))
        ));
    }
}
