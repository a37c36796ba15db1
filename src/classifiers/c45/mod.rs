mod attribute_selector;
mod c45_tree;
pub mod pruner;
mod split_model;
mod tree_node;

pub use attribute_selector::AttributeSelector;
pub use c45_tree::C45Tree;
pub use pruner::{ERROR_THRESHOLD, Pruner};
pub use split_model::{SplitModel, impute_missing};
pub use tree_node::TreeNode;
