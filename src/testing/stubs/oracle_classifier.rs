use crate::classifiers::Classifier;
use crate::core::TreeError;
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;

/// Always answers with the instance's own class, so any evaluation over it
/// is perfect.
#[derive(Default)]
pub struct OracleClassifier {
    num_classes: usize,
}

impl Classifier for OracleClassifier {
    fn train(&mut self, dataset: &Dataset) -> Result<(), TreeError> {
        self.num_classes = dataset.number_of_classes();
        Ok(())
    }

    fn class_probabilities(&self, instance: &dyn Instance) -> Result<Vec<f64>, TreeError> {
        let y = instance.class_value().unwrap_or_default();
        let mut v = vec![0.0; self.num_classes.max(2)];
        if y < v.len() {
            v[y] = 1.0;
        }
        Ok(v)
    }
}
