use crate::core::instance_header::InstanceHeader;
use crate::core::instances::Instance;
use serde::{Deserialize, Serialize};

/// The routing rule of a tree node: which outcome an instance falls into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SplitTest {
    /// Single outcome; every instance goes to branch 0.
    NoSplit,
    /// One branch per declared value of a nominal attribute.
    NominalMultiway {
        attribute_index: usize,
        num_values: usize,
    },
    /// Branch 0 for `value <= threshold`, branch 1 otherwise.
    NumericBinary { attribute_index: usize, threshold: f64 },
}

impl SplitTest {
    /// `None` when the tested value is missing (or outside the nominal domain),
    /// in which case the caller distributes the instance over all branches.
    pub fn branch_for_instance(&self, instance: &dyn Instance) -> Option<usize> {
        match self.attribute_index() {
            None => Some(0),
            Some(index) => {
                if instance.is_missing_at_index(index) {
                    return None;
                }
                self.branch_for_value(instance.value_at_index(index)?)
            }
        }
    }

    pub fn branch_for_value(&self, value: f64) -> Option<usize> {
        if value.is_nan() {
            return match self {
                SplitTest::NoSplit => Some(0),
                _ => None,
            };
        }

        match self {
            SplitTest::NoSplit => Some(0),
            SplitTest::NominalMultiway { num_values, .. } => {
                let branch = value as usize;
                (value >= 0.0 && branch < *num_values).then_some(branch)
            }
            SplitTest::NumericBinary { threshold, .. } => {
                if value <= *threshold {
                    Some(0)
                } else {
                    Some(1)
                }
            }
        }
    }

    pub fn max_branches(&self) -> usize {
        match self {
            SplitTest::NoSplit => 1,
            SplitTest::NominalMultiway { num_values, .. } => *num_values,
            SplitTest::NumericBinary { .. } => 2,
        }
    }

    pub fn attribute_index(&self) -> Option<usize> {
        match self {
            SplitTest::NoSplit => None,
            SplitTest::NominalMultiway {
                attribute_index, ..
            }
            | SplitTest::NumericBinary {
                attribute_index, ..
            } => Some(*attribute_index),
        }
    }

    pub fn threshold(&self) -> Option<f64> {
        match self {
            SplitTest::NumericBinary { threshold, .. } => Some(*threshold),
            _ => None,
        }
    }

    /// Human-readable condition of `branch`, e.g. `outlook = sunny` or
    /// `temperature <= 71.5`.
    pub fn describe_branch(&self, header: &InstanceHeader, branch: usize) -> String {
        match self {
            SplitTest::NoSplit => String::new(),
            SplitTest::NominalMultiway {
                attribute_index, ..
            } => {
                let label = header
                    .nominal_attribute(*attribute_index)
                    .and_then(|a| a.value(branch))
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("#{branch}"));
                format!("{} = {}", header.attribute_name(*attribute_index), label)
            }
            SplitTest::NumericBinary {
                attribute_index,
                threshold,
            } => {
                let op = if branch == 0 { "<=" } else { ">" };
                format!("{} {op} {threshold}", header.attribute_name(*attribute_index))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TreeError;
    use crate::testing::dummies::weather_header;

    struct MockInstance {
        values: Vec<f64>,
        class_idx: usize,
    }

    impl MockInstance {
        fn new(values: Vec<f64>, class_idx: usize) -> Self {
            Self { values, class_idx }
        }
    }

    impl Instance for MockInstance {
        fn weight(&self) -> f64 {
            1.0
        }
        fn set_weight(&mut self, _new_value: f64) -> Result<(), TreeError> {
            unimplemented!()
        }
        fn value_at_index(&self, index: usize) -> Option<f64> {
            self.values.get(index).copied()
        }
        fn set_value_at_index(&mut self, _index: usize, _new_value: f64) -> Result<(), TreeError> {
            unimplemented!()
        }
        fn class_index(&self) -> usize {
            self.class_idx
        }
        fn number_of_attributes(&self) -> usize {
            self.values.len()
        }
        fn to_vec(&self) -> Vec<f64> {
            self.values.clone()
        }
        fn header(&self) -> &InstanceHeader {
            unimplemented!()
        }
    }

    #[test]
    fn numeric_test_sends_equal_values_to_branch_zero() {
        let test = SplitTest::NumericBinary {
            attribute_index: 0,
            threshold: 2.5,
        };
        assert_eq!(test.branch_for_instance(&MockInstance::new(vec![2.5, 0.0], 1)), Some(0));
        assert_eq!(test.branch_for_instance(&MockInstance::new(vec![1.0, 0.0], 1)), Some(0));
        assert_eq!(test.branch_for_instance(&MockInstance::new(vec![3.0, 0.0], 1)), Some(1));
    }

    #[test]
    fn unset_threshold_keeps_everything_below() {
        let test = SplitTest::NumericBinary {
            attribute_index: 0,
            threshold: f64::MAX,
        };
        assert_eq!(test.branch_for_value(1e300), Some(0));
    }

    #[test]
    fn missing_value_has_no_branch() {
        let test = SplitTest::NominalMultiway {
            attribute_index: 0,
            num_values: 3,
        };
        assert_eq!(
            test.branch_for_instance(&MockInstance::new(vec![f64::NAN, 0.0], 1)),
            None
        );
        assert_eq!(
            test.branch_for_instance(&MockInstance::new(vec![2.0, 0.0], 1)),
            Some(2)
        );
        assert_eq!(test.branch_for_value(3.0), None);
    }

    #[test]
    fn no_split_routes_everything_to_branch_zero() {
        let test = SplitTest::NoSplit;
        assert_eq!(
            test.branch_for_instance(&MockInstance::new(vec![f64::NAN], 0)),
            Some(0)
        );
        assert_eq!(test.max_branches(), 1);
        assert_eq!(test.attribute_index(), None);
    }

    #[test]
    fn describe_branch_uses_names_and_labels() {
        let header = weather_header();
        let nominal = SplitTest::NominalMultiway {
            attribute_index: 0,
            num_values: 3,
        };
        let numeric = SplitTest::NumericBinary {
            attribute_index: 1,
            threshold: 71.5,
        };
        assert_eq!(nominal.describe_branch(&header, 1), "outlook = overcast");
        assert_eq!(numeric.describe_branch(&header, 0), "temperature <= 71.5");
        assert_eq!(numeric.describe_branch(&header, 1), "temperature > 71.5");
    }
}
