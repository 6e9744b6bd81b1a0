//! Edge and statistics types.

use serde::{Deserialize, Serialize};

/// A directed, weighted attacker move between two nodes.
///
/// `label` is informational only and never affects path cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub src: String,
    pub dst: String,
    #[serde(default)]
    pub label: String,
    pub weight: f64,
}

impl Edge {
    pub fn new(
        src: impl Into<String>,
        dst: impl Into<String>,
        label: impl Into<String>,
        weight: f64,
    ) -> Self {
        Self {
            src: src.into(),
            dst: dst.into(),
            label: label.into(),
            weight,
        }
    }
}

/// Outcome of inserting-or-updating a keyed edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    Inserted,
    Updated,
}

/// Graph statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
}
