use crate::classifiers::Classifier;
use crate::core::TreeError;
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use std::cell::RefCell;
use std::rc::Rc;

/// Sizes of every training set the spy has been handed, in call order.
pub struct TrainSpyHandle(Rc<RefCell<Vec<usize>>>);

impl TrainSpyHandle {
    pub fn count(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn training_sizes(&self) -> Vec<usize> {
        self.0.borrow().clone()
    }
}

/// Predicts class 0 for everything and records each `train` call. Clones
/// share the same record.
#[derive(Clone)]
pub struct TrainSpyClassifier {
    calls: Rc<RefCell<Vec<usize>>>,
    num_classes: usize,
}

impl TrainSpyClassifier {
    pub fn new() -> (Self, TrainSpyHandle) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        (
            Self {
                calls: Rc::clone(&calls),
                num_classes: 2,
            },
            TrainSpyHandle(calls),
        )
    }
}

impl Classifier for TrainSpyClassifier {
    fn train(&mut self, dataset: &Dataset) -> Result<(), TreeError> {
        self.num_classes = dataset.number_of_classes();
        self.calls.borrow_mut().push(dataset.len());
        Ok(())
    }

    fn class_probabilities(&self, _inst: &dyn Instance) -> Result<Vec<f64>, TreeError> {
        let mut v = vec![0.0; self.num_classes.max(1)];
        v[0] = 1.0;
        Ok(v)
    }
}
