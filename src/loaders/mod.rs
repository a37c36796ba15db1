pub mod arff;

pub use arff::{ArffLoader, load_arff, save_arff};
