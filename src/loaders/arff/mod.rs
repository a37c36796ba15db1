mod arff_loader;
mod arff_writer;
mod parser;

pub use arff_loader::{ArffLoader, load_arff, read_arff};
pub use arff_writer::{save_arff, write_arff};
