use crate::core::attributes::Attribute;
use crate::utils::file_parsing::quote_if_needed;
use std::any::Any;

#[derive(Clone, Debug)]
pub struct NumericAttribute {
    pub name: String,
}

impl NumericAttribute {
    pub fn new(name: String) -> NumericAttribute {
        NumericAttribute { name }
    }
}

impl Attribute for NumericAttribute {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn arff_representation(&self) -> String {
        format!("@attribute {} numeric", quote_if_needed(&self.name))
    }

    fn number_of_values(&self) -> usize {
        0
    }

    fn format_value(&self, value: f64) -> String {
        if value.is_nan() {
            "?".to_string()
        } else {
            format!("{value}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_declaration_and_values() {
        let att = NumericAttribute::new("wind speed".into());
        assert_eq!(att.arff_representation(), "@attribute 'wind speed' numeric");
        assert_eq!(att.format_value(77.5), "77.5");
        assert_eq!(att.format_value(80.0), "80");
        assert_eq!(att.format_value(f64::NAN), "?");
    }
}
