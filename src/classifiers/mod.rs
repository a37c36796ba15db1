pub mod c45;
mod classifier;
pub mod id3;
pub mod model_io;
pub mod split_criteria;
pub mod split_test;

pub use c45::C45Tree;
pub use classifier::Classifier;
pub use id3::Id3Tree;
pub use model_io::{SavedModel, TreeAlgorithm, TreeModel, load_model, save_model};
