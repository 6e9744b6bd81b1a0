//! Attack-path store — petgraph-backed adjacency store + hub augmentation.

pub mod augment;
pub mod graph;
pub mod types;

pub use augment::{augment_for_connectivity, AugmentReport};
pub use graph::AttackGraph;
pub use types::*;
