use crate::core::attributes::Attribute;
use crate::utils::file_parsing::quote_if_needed;
use std::any::Any;
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct NominalAttribute {
    pub name: String,
    pub values: Vec<String>,
    pub label_to_index: HashMap<String, usize>,
}

impl NominalAttribute {
    pub fn new(name: String) -> NominalAttribute {
        NominalAttribute {
            name,
            values: Vec::new(),
            label_to_index: HashMap::new(),
        }
    }

    pub fn with_values(
        name: String,
        values: Vec<String>,
        label_to_index: HashMap<String, usize>,
    ) -> NominalAttribute {
        NominalAttribute {
            name,
            values,
            label_to_index,
        }
    }

    /// Builds the label index from the declaration order of `values`.
    pub fn from_labels(name: impl Into<String>, values: Vec<String>) -> NominalAttribute {
        let label_to_index = values
            .iter()
            .enumerate()
            .map(|(i, v)| (v.clone(), i))
            .collect();
        NominalAttribute {
            name: name.into(),
            values,
            label_to_index,
        }
    }

    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn index_of_value(&self, label: &str) -> Option<usize> {
        self.label_to_index.get(label).copied()
    }

    pub fn enumerate_values(&self) -> impl Iterator<Item = (usize, &String)> {
        self.values.iter().enumerate()
    }
}

impl Attribute for NominalAttribute {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn arff_representation(&self) -> String {
        let labels = self
            .values
            .iter()
            .map(|v| quote_if_needed(v))
            .collect::<Vec<_>>();
        format!(
            "@attribute {} {{{}}}",
            quote_if_needed(&self.name),
            labels.join(",")
        )
    }

    fn number_of_values(&self) -> usize {
        self.values.len()
    }

    fn format_value(&self, value: f64) -> String {
        if value.is_nan() {
            return "?".to_string();
        }
        match self.value(value as usize) {
            Some(label) => quote_if_needed(label),
            None => "?".to_string(),
        }
    }
}
