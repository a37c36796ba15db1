use crate::core::TreeError;
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::utils::math::max_index;

/// Anything that can be trained on a dataset and then asked for a class.
pub trait Classifier {
    fn train(&mut self, dataset: &Dataset) -> Result<(), TreeError>;

    /// One probability per class label, in class-attribute order.
    fn class_probabilities(&self, instance: &dyn Instance) -> Result<Vec<f64>, TreeError>;

    /// Index of the most probable class; ties go to the lowest index.
    fn classify(&self, instance: &dyn Instance) -> Result<usize, TreeError> {
        Ok(max_index(&self.class_probabilities(instance)?))
    }
}
