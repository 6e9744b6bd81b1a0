//! Analyzer — the query surface consumed by front ends.

use std::sync::Arc;

use attackpath_core::{Error, HubConfig, Result};
use attackpath_store::{augment_for_connectivity, AttackGraph, AugmentReport, GraphStats};
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::dijkstra::ShortestPathTree;
use crate::types::{PathOutcome, RankedTarget};

/// Owns an attack graph and answers path and ranking queries over it.
///
/// Mutation takes `&mut self` and queries take `&self`, so a graph can never
/// change under an in-flight query.
pub struct Analyzer {
    graph: AttackGraph,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::from_graph(AttackGraph::new())
    }

    pub fn from_graph(graph: AttackGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &AttackGraph {
        &self.graph
    }

    pub fn add_edge(&mut self, src: &str, dst: &str, label: &str, weight: f64) -> Result<()> {
        self.graph.add_edge(src, dst, label, weight)
    }

    pub fn add_node(&mut self, id: &str) {
        self.graph.add_node(id);
    }

    /// Route every node in `nodes` to and from the configured hub.
    pub fn augment_for_connectivity<S: AsRef<str>>(
        &mut self,
        nodes: &[S],
        config: &HubConfig,
    ) -> Result<AugmentReport> {
        augment_for_connectivity(&mut self.graph, nodes, config)
    }

    /// Run Dijkstra once from `start` for repeated lookups.
    pub fn tree(&self, start: &str) -> Result<ShortestPathTree<'_>> {
        ShortestPathTree::compute(&self.graph, start)
    }

    /// Minimum-cost path from `start` to `target`.
    ///
    /// Both nodes must exist; a missing path is `PathOutcome::Unreachable`.
    pub fn shortest_path(&self, start: &str, target: &str) -> Result<PathOutcome> {
        self.require(target)?;
        let outcome = self.tree(start)?.path_to(target)?;
        debug!(
            "shortest_path {} -> {}: cost={} hops={}",
            start,
            target,
            outcome.cost(),
            outcome.hops()
        );
        Ok(outcome)
    }

    /// Rank `targets` by minimum cost from `start`, cheapest first.
    pub fn rank<S: AsRef<str>>(&self, start: &str, targets: &[S]) -> Result<Vec<RankedTarget>> {
        for target in targets {
            self.require(target.as_ref())?;
        }
        let ranked = self.tree(start)?.rank(targets)?;
        info!(
            "Ranked {} targets from {}: {} reachable",
            ranked.len(),
            start,
            ranked.iter().filter(|r| r.is_reachable()).count()
        );
        Ok(ranked)
    }

    pub fn list_nodes(&self) -> Vec<String> {
        self.graph.nodes()
    }

    pub fn stats(&self) -> GraphStats {
        self.graph.stats()
    }

    fn require(&self, node: &str) -> Result<()> {
        if self.graph.contains(node) {
            Ok(())
        } else {
            Err(Error::UnknownNode(node.to_string()))
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe handle to an `Analyzer`.
///
/// Queries hold the read lock for their whole traversal; mutations take the
/// write lock, so they never interleave with a running query.
#[derive(Clone)]
pub struct SharedAnalyzer {
    inner: Arc<RwLock<Analyzer>>,
}

impl SharedAnalyzer {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            inner: Arc::new(RwLock::new(analyzer)),
        }
    }

    pub fn add_edge(&self, src: &str, dst: &str, label: &str, weight: f64) -> Result<()> {
        self.inner.write().add_edge(src, dst, label, weight)
    }

    pub fn augment_for_connectivity<S: AsRef<str>>(
        &self,
        nodes: &[S],
        config: &HubConfig,
    ) -> Result<AugmentReport> {
        self.inner.write().augment_for_connectivity(nodes, config)
    }

    pub fn shortest_path(&self, start: &str, target: &str) -> Result<PathOutcome> {
        self.inner.read().shortest_path(start, target)
    }

    pub fn rank<S: AsRef<str>>(&self, start: &str, targets: &[S]) -> Result<Vec<RankedTarget>> {
        self.inner.read().rank(start, targets)
    }

    pub fn list_nodes(&self) -> Vec<String> {
        self.inner.read().list_nodes()
    }

    /// Run several lookups against one consistent snapshot.
    pub fn with_read<T>(&self, f: impl FnOnce(&Analyzer) -> T) -> T {
        f(&self.inner.read())
    }
}
