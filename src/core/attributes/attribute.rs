use super::{NominalAttribute, NumericAttribute};
use std::any::Any;
use std::sync::Arc;

pub type AttributeRef = Arc<dyn Attribute + Send + Sync>;

pub trait Attribute: Any + Send + Sync {
    fn name(&self) -> String;

    fn as_any(&self) -> &dyn Any;

    fn arff_representation(&self) -> String;

    /// Size of the declared domain; zero for attributes without one.
    fn number_of_values(&self) -> usize;

    /// Renders a stored value the way it appears in an ARFF data row.
    fn format_value(&self, value: f64) -> String;
}

impl dyn Attribute + Send + Sync {
    pub fn is_nominal(&self) -> bool {
        self.as_any().is::<NominalAttribute>()
    }

    pub fn is_numeric(&self) -> bool {
        self.as_any().is::<NumericAttribute>()
    }

    pub fn as_nominal(&self) -> Option<&NominalAttribute> {
        self.as_any().downcast_ref::<NominalAttribute>()
    }
}
