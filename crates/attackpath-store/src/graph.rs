//! Attack graph backend using petgraph.
//!
//! Nodes are opaque string ids mapped to `NodeIndex`. Nothing is ever removed,
//! so node and edge indices follow insertion order.

use std::collections::HashMap;

use attackpath_core::{validate_weight, Result};
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::trace;

use crate::types::{Edge, GraphStats, Upsert};

/// Directed, weighted attack graph.
///
/// Every endpoint of every edge is a registered node, so neighbor lookups
/// never fail for reachable nodes.
pub struct AttackGraph {
    graph: DiGraph<String, Edge>,
    node_index: HashMap<String, NodeIndex>,
}

impl AttackGraph {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// Register a node with no outgoing edges. No-op if it already exists.
    pub fn add_node(&mut self, id: &str) -> NodeIndex {
        if let Some(idx) = self.node_index.get(id) {
            return *idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.node_index.insert(id.to_string(), idx);
        idx
    }

    /// Append an edge to `src`'s outgoing list, registering both endpoints.
    ///
    /// Fails with `InvalidWeight` for negative or non-finite weights; the graph
    /// is left untouched in that case.
    pub fn add_edge(&mut self, src: &str, dst: &str, label: &str, weight: f64) -> Result<()> {
        validate_weight(src, dst, weight)?;
        let src_idx = self.add_node(src);
        let dst_idx = self.add_node(dst);
        self.graph
            .add_edge(src_idx, dst_idx, Edge::new(src, dst, label, weight));
        trace!("edge {} -> {} [{}] w={}", src, dst, label, weight);
        Ok(())
    }

    /// Insert an edge keyed by `(src, dst, label)`, or replace the weight of
    /// the existing one.
    pub fn upsert_edge(
        &mut self,
        src: &str,
        dst: &str,
        label: &str,
        weight: f64,
    ) -> Result<Upsert> {
        validate_weight(src, dst, weight)?;
        let src_idx = self.add_node(src);
        let dst_idx = self.add_node(dst);

        let existing = self
            .graph
            .edges_connecting(src_idx, dst_idx)
            .find(|e| e.weight().label == label)
            .map(|e| e.id());

        if let Some(edge) = existing.and_then(|id| self.graph.edge_weight_mut(id)) {
            edge.weight = weight;
            return Ok(Upsert::Updated);
        }
        self.graph
            .add_edge(src_idx, dst_idx, Edge::new(src, dst, label, weight));
        Ok(Upsert::Inserted)
    }

    /// Outgoing edges of `id` in insertion order; empty for unknown nodes.
    pub fn neighbors(&self, id: &str) -> Vec<&Edge> {
        match self.node_index.get(id) {
            Some(idx) => self
                .outgoing(*idx)
                .into_iter()
                .map(|(_, _, edge)| edge)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Outgoing edges of `idx` as `(edge index, target, edge)`, insertion order.
    pub fn outgoing(&self, idx: NodeIndex) -> Vec<(EdgeIndex, NodeIndex, &Edge)> {
        // petgraph walks a node's edge list newest-first
        let mut out: Vec<_> = self
            .graph
            .edges(idx)
            .map(|e| (e.id(), e.target(), e.weight()))
            .collect();
        out.reverse();
        out
    }

    /// All node ids in registration order.
    pub fn nodes(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.graph.edge_weights()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    pub fn node_id(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    pub fn edge(&self, idx: EdgeIndex) -> Option<&Edge> {
        self.graph.edge_weight(idx)
    }

    /// Get graph statistics.
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
        }
    }
}

impl Default for AttackGraph {
    fn default() -> Self {
        Self::new()
    }
}
