use crate::core::error::TreeError;
use crate::core::instance_header::InstanceHeader;

/// A single row of attribute values. Missing values are stored as `NaN`.
pub trait Instance {
    fn weight(&self) -> f64;

    fn set_weight(&mut self, new_value: f64) -> Result<(), TreeError>;

    fn value_at_index(&self, index: usize) -> Option<f64>;

    fn set_value_at_index(&mut self, index: usize, new_value: f64) -> Result<(), TreeError>;

    /// Out-of-range indices count as missing.
    fn is_missing_at_index(&self, index: usize) -> bool {
        self.value_at_index(index).is_none_or(f64::is_nan)
    }

    fn class_index(&self) -> usize;

    /// `None` when the class value is missing.
    fn class_value(&self) -> Option<usize> {
        self.value_at_index(self.class_index())
            .filter(|v| !v.is_nan())
            .map(|v| v as usize)
    }

    fn number_of_attributes(&self) -> usize;

    fn has_missing_value(&self) -> bool {
        (0..self.number_of_attributes())
            .filter(|&i| i != self.class_index())
            .any(|i| self.is_missing_at_index(i))
    }

    fn to_vec(&self) -> Vec<f64>;

    fn header(&self) -> &InstanceHeader;
}
