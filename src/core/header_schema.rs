use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::instance_header::InstanceHeader;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Serialisable snapshot of an [`InstanceHeader`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderSchema {
    pub relation: String,
    pub attributes: Vec<AttributeSchema>,
    pub class_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AttributeSchema {
    Nominal { name: String, values: Vec<String> },
    Numeric { name: String },
}

impl From<&InstanceHeader> for HeaderSchema {
    fn from(header: &InstanceHeader) -> Self {
        let attributes = header
            .attributes
            .iter()
            .map(|attr| match attr.as_nominal() {
                Some(nominal) => AttributeSchema::Nominal {
                    name: nominal.name.clone(),
                    values: nominal.values.clone(),
                },
                None => AttributeSchema::Numeric { name: attr.name() },
            })
            .collect();

        HeaderSchema {
            relation: header.relation_name().to_string(),
            attributes,
            class_index: header.class_index(),
        }
    }
}

impl HeaderSchema {
    pub fn into_header(self) -> InstanceHeader {
        let attributes = self
            .attributes
            .into_iter()
            .map(|a| match a {
                AttributeSchema::Nominal { name, values } => {
                    Arc::new(NominalAttribute::from_labels(name, values)) as AttributeRef
                }
                AttributeSchema::Numeric { name } => {
                    Arc::new(NumericAttribute::new(name)) as AttributeRef
                }
            })
            .collect();
        InstanceHeader::new(self.relation, attributes, self.class_index)
    }

    /// Two headers are compatible when they agree on everything but the relation name.
    pub fn is_compatible_with(&self, other: &HeaderSchema) -> bool {
        self.class_index == other.class_index && self.attributes == other.attributes
    }
}
