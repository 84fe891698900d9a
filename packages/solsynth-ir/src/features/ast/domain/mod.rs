mod node_type;

pub use node_type::{NodeGroup, NodeType};
