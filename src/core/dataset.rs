use crate::core::error::TreeError;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, Instance};
use std::cell::{Ref, RefCell};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Shared storage for one instance. Every view of a dataset that was derived
/// from the same source (partitions, class filters, subsets) points to the
/// same cell, so in-place imputation is observed by all of them.
pub type InstanceRef = Rc<RefCell<DenseInstance>>;

/// A view of an instance carrying its own weight. The weight of the view
/// overrides the stored weight, which lets a partition hand out a fraction of
/// an instance without copying its values.
#[derive(Clone)]
pub struct WeightedInstance {
    instance: InstanceRef,
    weight: f64,
}

impl WeightedInstance {
    pub fn new(instance: InstanceRef, weight: f64) -> Self {
        Self { instance, weight }
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn instance(&self) -> Ref<'_, DenseInstance> {
        self.instance.borrow()
    }

    pub fn shared(&self) -> &InstanceRef {
        &self.instance
    }

    /// Same storage, different weight.
    pub fn reweighted(&self, weight: f64) -> Self {
        Self {
            instance: Rc::clone(&self.instance),
            weight,
        }
    }

    pub fn value(&self, index: usize) -> f64 {
        self.instance
            .borrow()
            .value_at_index(index)
            .unwrap_or(f64::NAN)
    }

    pub fn is_missing(&self, index: usize) -> bool {
        self.instance.borrow().is_missing_at_index(index)
    }

    pub fn class_value(&self) -> Option<usize> {
        self.instance.borrow().class_value()
    }

    /// Overwrites a stored value. The write goes to the shared storage and is
    /// therefore visible through every view of this instance.
    pub fn set_value(&self, index: usize, value: f64) -> Result<(), TreeError> {
        self.instance.borrow_mut().set_value_at_index(index, value)
    }
}

#[derive(Clone)]
pub struct Dataset {
    header: Arc<InstanceHeader>,
    entries: Vec<WeightedInstance>,
}

impl Dataset {
    pub fn new(header: Arc<InstanceHeader>) -> Self {
        Self {
            header,
            entries: Vec::new(),
        }
    }

    pub fn from_instances(header: Arc<InstanceHeader>, instances: Vec<DenseInstance>) -> Self {
        let mut dataset = Self::new(header);
        for instance in instances {
            dataset.push(instance);
        }
        dataset
    }

    /// Unit-weight rows laid out in header order.
    pub fn from_rows(header: Arc<InstanceHeader>, rows: Vec<Vec<f64>>) -> Self {
        let instances = rows
            .into_iter()
            .map(|values| DenseInstance::with_values(Arc::clone(&header), values))
            .collect();
        Self::from_instances(header, instances)
    }

    pub fn push(&mut self, instance: DenseInstance) {
        let weight = instance.weight();
        self.entries
            .push(WeightedInstance::new(Rc::new(RefCell::new(instance)), weight));
    }

    pub fn push_entry(&mut self, entry: WeightedInstance) {
        self.entries.push(entry);
    }

    /// An empty dataset sharing this one's header.
    pub fn empty_like(&self) -> Self {
        Self::new(Arc::clone(&self.header))
    }

    pub fn header(&self) -> &Arc<InstanceHeader> {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[WeightedInstance] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeightedInstance> {
        self.entries.iter()
    }

    pub fn class_index(&self) -> usize {
        self.header.class_index()
    }

    pub fn number_of_classes(&self) -> usize {
        self.header.number_of_classes()
    }

    pub fn number_of_attributes(&self) -> usize {
        self.header.number_of_attributes()
    }

    pub fn total_weight(&self) -> f64 {
        self.entries.iter().map(WeightedInstance::weight).sum()
    }

    /// Weighted class histogram; entries with a missing class are skipped.
    pub fn class_counts(&self) -> Vec<f64> {
        let mut counts = vec![0.0; self.number_of_classes()];
        for entry in &self.entries {
            if let Some(c) = entry.class_value()
                && c < counts.len()
            {
                counts[c] += entry.weight();
            }
        }
        counts
    }

    /// True when any non-class attribute of any entry is missing.
    pub fn has_missing_values(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.instance().has_missing_value())
    }

    /// Views of the entries whose class value is present.
    pub fn without_missing_class(&self) -> Self {
        Self {
            header: Arc::clone(&self.header),
            entries: self
                .entries
                .iter()
                .filter(|e| e.class_value().is_some())
                .cloned()
                .collect(),
        }
    }

    /// Views of the entries at `indices`, in the given order.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            header: Arc::clone(&self.header),
            entries: indices
                .iter()
                .filter_map(|&i| self.entries.get(i).cloned())
                .collect(),
        }
    }

    /// Copies every instance into fresh storage. The view weights become the
    /// stored weights of the copies.
    pub fn deep_copy(&self) -> Self {
        let mut copy = self.empty_like();
        for entry in &self.entries {
            let mut instance = entry.instance().clone();
            instance.weight = entry.weight();
            copy.push(instance);
        }
        copy
    }

    /// Enforces the header invariants plus per-row shape, class range and
    /// nominal domain checks.
    pub fn validate(&self) -> Result<(), TreeError> {
        self.header.validate()?;

        let n_attributes = self.header.number_of_attributes();
        for (row, entry) in self.entries.iter().enumerate() {
            let instance = entry.instance();
            if instance.number_of_attributes() != n_attributes {
                return Err(TreeError::InvalidDataset(format!(
                    "instance #{row} has {} values, expected {n_attributes}",
                    instance.number_of_attributes()
                )));
            }
            if entry.weight() < 0.0 || entry.weight().is_nan() {
                return Err(TreeError::InvalidDataset(format!(
                    "instance #{row} has invalid weight {}",
                    entry.weight()
                )));
            }
            for index in 0..n_attributes {
                let Some(nominal) = self.header.nominal_attribute(index) else {
                    continue;
                };
                let value = instance.value_at_index(index).unwrap_or(f64::NAN);
                if value.is_nan() {
                    continue;
                }
                if value < 0.0 || value.fract() != 0.0 || value as usize >= nominal.values.len()
                {
                    return Err(TreeError::InvalidDataset(format!(
                        "instance #{row}: value {value} outside the domain of '{}'",
                        nominal.name
                    )));
                }
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("relation_name", &self.header.relation_name())
            .field("n_instances", &self.entries.len())
            .field("total_weight", &self.total_weight())
            .finish()
    }
}
