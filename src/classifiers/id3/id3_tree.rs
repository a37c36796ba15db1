use crate::classifiers::Classifier;
use crate::classifiers::id3::id3_node::Id3Node;
use crate::core::TreeError;
use crate::core::dataset::Dataset;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Information-gain tree over nominal attributes. No pruning, no numeric
/// attributes, no missing values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id3Tree {
    root: Option<Id3Node>,
    #[serde(skip)]
    header: Option<Arc<InstanceHeader>>,
}

impl Id3Tree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> Option<&Id3Node> {
        self.root.as_ref()
    }

    pub fn header(&self) -> Option<&Arc<InstanceHeader>> {
        self.header.as_ref()
    }

    pub fn set_header(&mut self, header: Arc<InstanceHeader>) {
        self.header = Some(header);
    }

    pub fn num_leaves(&self) -> usize {
        self.root.as_ref().map_or(0, Id3Node::num_leaves)
    }

    pub fn num_nodes(&self) -> usize {
        self.root.as_ref().map_or(0, Id3Node::num_nodes)
    }
}

/// Rejects numeric predictors and missing predictor values.
fn check_capabilities(dataset: &Dataset) -> Result<(), TreeError> {
    let header = dataset.header();
    if let Some(index) = header.predictor_indices().find(|&i| !header.is_nominal(i)) {
        return Err(TreeError::UnsupportedFeature(format!(
            "ID3 handles nominal attributes only, '{}' is numeric",
            header.attribute_name(index)
        )));
    }
    if dataset.has_missing_values() {
        return Err(TreeError::UnsupportedFeature(
            "ID3 cannot handle missing values".into(),
        ));
    }
    Ok(())
}

impl Classifier for Id3Tree {
    fn train(&mut self, dataset: &Dataset) -> Result<(), TreeError> {
        dataset.validate()?;
        check_capabilities(dataset)?;

        let available: Vec<usize> = dataset.header().predictor_indices().collect();
        self.root = Some(Id3Node::build(&dataset.without_missing_class(), &available));
        self.header = Some(Arc::clone(dataset.header()));
        Ok(())
    }

    fn class_probabilities(&self, instance: &dyn Instance) -> Result<Vec<f64>, TreeError> {
        let root = self.root.as_ref().ok_or(TreeError::NotBuilt)?;
        if instance.has_missing_value() {
            return Err(TreeError::UnsupportedFeature(
                "ID3 cannot classify an instance with missing values".into(),
            ));
        }
        root.distribution(instance)
    }
}

impl fmt::Display for Id3Tree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(root) = &self.root else {
            return writeln!(f, "Id3: No model built yet.");
        };

        writeln!(f, "Id3")?;
        writeln!(f)?;
        match &self.header {
            Some(header) => root.write_tree(f, header, 0)?,
            None => write!(f, "(attribute names unavailable)")?,
        }
        writeln!(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::instances::DenseInstance;
    use crate::testing::dummies::{
        a_predicts_class_dataset, weather_dataset, weather_nominal_dataset,
    };

    #[test]
    fn rejects_numeric_attributes() {
        assert!(matches!(
            Id3Tree::new().train(&weather_dataset()),
            Err(TreeError::UnsupportedFeature(_))
        ));
    }

    #[test]
    fn rejects_missing_values_in_training() {
        let data = weather_nominal_dataset();
        data.entries()[3].set_value(1, f64::NAN).unwrap();
        assert!(matches!(
            Id3Tree::new().train(&data),
            Err(TreeError::UnsupportedFeature(_))
        ));
    }

    #[test]
    fn rejects_missing_values_in_classification() {
        let data = weather_nominal_dataset();
        let mut tree = Id3Tree::new();
        tree.train(&data).unwrap();

        let mut probe = data.entries()[0].instance().clone();
        probe.values[3] = f64::NAN;
        assert!(matches!(
            tree.classify(&probe),
            Err(TreeError::UnsupportedFeature(_))
        ));
    }

    #[test]
    fn classify_before_train_is_an_error() {
        let probe = a_predicts_class_dataset().entries()[0].instance().clone();
        assert!(matches!(
            Id3Tree::new().classify(&probe),
            Err(TreeError::NotBuilt)
        ));
    }

    #[test]
    fn fits_weather_training_data() {
        let data = weather_nominal_dataset();
        let mut tree = Id3Tree::new();
        tree.train(&data).unwrap();

        for entry in data.iter() {
            let instance = entry.instance();
            assert_eq!(tree.classify(&*instance).unwrap(), entry.class_value().unwrap());
        }
    }

    #[test]
    fn unseen_branch_falls_back_to_first_class() {
        let header = a_predicts_class_dataset().header().clone();
        // no row has A = y, and neither attribute separates the classes
        let data = Dataset::from_rows(
            Arc::clone(&header),
            vec![vec![0.0, 0.0, 1.0], vec![0.0, 0.0, 0.0]],
        );
        let mut tree = Id3Tree::new();
        tree.train(&data).unwrap();

        let probe = DenseInstance::with_values(header, vec![1.0, 0.0, f64::NAN]);
        let dist = tree.class_probabilities(&probe).unwrap();
        assert_eq!(dist, vec![0.0, 0.0]);
        assert_eq!(tree.classify(&probe).unwrap(), 0);
    }

    #[test]
    fn display_lists_branches_in_declaration_order() {
        let mut tree = Id3Tree::new();
        tree.train(&weather_nominal_dataset()).unwrap();
        let text = tree.to_string();

        assert!(text.starts_with("Id3\n\n"));
        assert!(text.contains("\noutlook = sunny\n|  humidity = high: no\n|  humidity = normal: yes"));
        assert!(text.contains("\noutlook = overcast: yes"));
        assert!(text.contains("\n|  windy = TRUE: no"));
    }
}
