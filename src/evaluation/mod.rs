mod evaluator;
mod measurement;
mod validation;

pub use evaluator::Evaluation;
pub use measurement::Measurement;
pub use validation::{cross_validate, evaluate_model, percentage_split};
