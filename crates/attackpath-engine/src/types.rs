//! Query result types.

use attackpath_store::Edge;
use serde::Serialize;

/// Result of a shortest-path query.
///
/// `Reachable` with no edges means start and target are the same node;
/// a missing path is always `Unreachable`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PathOutcome {
    Reachable { cost: f64, edges: Vec<Edge> },
    Unreachable,
}

impl PathOutcome {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Self::Reachable { .. })
    }

    /// Total cost, `f64::INFINITY` when unreachable.
    pub fn cost(&self) -> f64 {
        match self {
            Self::Reachable { cost, .. } => *cost,
            Self::Unreachable => f64::INFINITY,
        }
    }

    /// Edges in forward order; empty when unreachable.
    pub fn edges(&self) -> &[Edge] {
        match self {
            Self::Reachable { edges, .. } => edges,
            Self::Unreachable => &[],
        }
    }

    pub fn hops(&self) -> usize {
        self.edges().len()
    }
}

/// One entry of an asset reach ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTarget {
    pub node: String,
    /// `f64::INFINITY` when unreachable (serialized as `null`).
    pub cost: f64,
}

impl RankedTarget {
    pub fn is_reachable(&self) -> bool {
        self.cost.is_finite()
    }
}
