mod id3_node;
mod id3_tree;

pub use id3_node::Id3Node;
pub use id3_tree::Id3Tree;
