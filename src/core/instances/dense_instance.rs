use crate::core::error::TreeError;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::instance::Instance;
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct DenseInstance {
    pub header: Arc<InstanceHeader>,
    pub values: Vec<f64>,
    pub weight: f64,
}

impl DenseInstance {
    pub fn new(header: Arc<InstanceHeader>, values: Vec<f64>, weight: f64) -> DenseInstance {
        DenseInstance {
            header,
            values,
            weight,
        }
    }

    /// Unit-weight instance.
    pub fn with_values(header: Arc<InstanceHeader>, values: Vec<f64>) -> DenseInstance {
        Self::new(header, values, 1.0)
    }
}

impl Instance for DenseInstance {
    fn weight(&self) -> f64 {
        self.weight
    }

    fn set_weight(&mut self, new_value: f64) -> Result<(), TreeError> {
        if new_value < 0.0 || new_value.is_nan() {
            return Err(TreeError::InvalidDataset(format!(
                "weight must be non-negative, got {new_value}"
            )));
        }
        self.weight = new_value;
        Ok(())
    }

    fn value_at_index(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    fn set_value_at_index(&mut self, index: usize, new_value: f64) -> Result<(), TreeError> {
        match self.values.get_mut(index) {
            Some(slot) => {
                *slot = new_value;
                Ok(())
            }
            None => Err(TreeError::InvalidDataset(format!(
                "attribute index {index} out of bounds for {} values",
                self.values.len()
            ))),
        }
    }

    fn class_index(&self) -> usize {
        self.header.class_index()
    }

    fn number_of_attributes(&self) -> usize {
        self.values.len()
    }

    fn to_vec(&self) -> Vec<f64> {
        self.values.clone()
    }

    fn header(&self) -> &InstanceHeader {
        &self.header
    }
}
