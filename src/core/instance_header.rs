use crate::core::attributes::{Attribute, AttributeRef, NominalAttribute};
use crate::core::error::TreeError;
use std::fmt;

pub struct InstanceHeader {
    relation_name: String,
    pub attributes: Vec<AttributeRef>,
    class_index: usize,
}

impl InstanceHeader {
    pub fn new(
        relation_name: String,
        attributes: Vec<AttributeRef>,
        class_index: usize,
    ) -> InstanceHeader {
        InstanceHeader {
            relation_name,
            attributes,
            class_index,
        }
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&(dyn Attribute + Send + Sync)> {
        self.attributes.get(index).map(|a| a.as_ref())
    }

    pub fn index_of_attribute(&self, name: &str) -> Option<usize> {
        self.attributes.iter().position(|attr| attr.name() == name)
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    pub fn class_attribute(&self) -> Option<&NominalAttribute> {
        self.nominal_attribute(self.class_index)
    }

    pub fn nominal_attribute(&self, index: usize) -> Option<&NominalAttribute> {
        self.attribute_at_index(index).and_then(|a| a.as_nominal())
    }

    /// Declared labels of a nominal attribute; `None` for numeric or unknown
    /// indices.
    pub fn nominal_values(&self, index: usize) -> Option<&[String]> {
        self.nominal_attribute(index).map(|a| a.values.as_slice())
    }

    pub fn is_nominal(&self, index: usize) -> bool {
        self.attribute_at_index(index)
            .is_some_and(|a| a.is_nominal())
    }

    pub fn number_of_classes(&self) -> usize {
        self.class_attribute().map(|c| c.values.len()).unwrap_or(0)
    }

    pub fn class_label(&self, class_index: usize) -> String {
        self.class_attribute()
            .and_then(|c| c.value(class_index))
            .map(str::to_string)
            .unwrap_or_else(|| format!("class#{class_index}"))
    }

    pub fn attribute_name(&self, index: usize) -> String {
        self.attribute_at_index(index)
            .map(|a| a.name())
            .unwrap_or_else(|| format!("att#{index}"))
    }

    /// Attribute indices in declaration order, class attribute excluded.
    pub fn predictor_indices(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.attributes.len()).filter(move |&i| i != self.class_index)
    }

    /// Checks the structural preconditions every tree learner relies on.
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.attributes.is_empty() {
            return Err(TreeError::InvalidDataset(
                "dataset declares no attributes".into(),
            ));
        }
        if self.class_index >= self.attributes.len() {
            return Err(TreeError::InvalidDataset(format!(
                "class index {} out of range for {} attributes",
                self.class_index,
                self.attributes.len()
            )));
        }
        if self.class_attribute().is_none() {
            return Err(TreeError::InvalidDataset(format!(
                "class attribute '{}' must be nominal",
                self.attribute_name(self.class_index)
            )));
        }
        Ok(())
    }

    pub fn arff_header(&self) -> String {
        let mut out = format!(
            "@relation {}\n\n",
            crate::utils::file_parsing::quote_if_needed(&self.relation_name)
        );
        for attr in &self.attributes {
            out.push_str(&attr.arff_representation());
            out.push('\n');
        }
        out
    }
}

impl fmt::Debug for InstanceHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceHeader")
            .field("relation_name", &self.relation_name)
            .field("class_index", &self.class_index)
            .field("n_attributes", &self.attributes.len())
            .finish()
    }
}
