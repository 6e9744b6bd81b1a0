//! Single-source Dijkstra with lazy deletion.
//!
//! `BinaryHeap` has no decrease-key, so improved distances are pushed as new
//! entries and stale ones are skipped when popped.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use attackpath_core::{Error, Result};
use attackpath_store::AttackGraph;
use petgraph::graph::{EdgeIndex, NodeIndex};
use tracing::debug;

use crate::types::{PathOutcome, RankedTarget};

/// Priority queue entry. Ordered as a min-heap on distance, then push order.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    distance: f64,
    seq: u64,
    node: NodeIndex,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // reversed for min-heap
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Distances and predecessor links from one start node.
///
/// Borrows the graph it was computed on, so the graph cannot change while
/// the tree is alive.
pub struct ShortestPathTree<'g> {
    graph: &'g AttackGraph,
    start: NodeIndex,
    dist: HashMap<NodeIndex, f64>,
    prev: HashMap<NodeIndex, (NodeIndex, EdgeIndex)>,
}

impl<'g> ShortestPathTree<'g> {
    /// Run Dijkstra from `start`. Fails with `UnknownNode` if `start` is absent.
    pub fn compute(graph: &'g AttackGraph, start: &str) -> Result<Self> {
        let start_idx = graph
            .index_of(start)
            .ok_or_else(|| Error::UnknownNode(start.to_string()))?;

        let mut dist: HashMap<NodeIndex, f64> = HashMap::new();
        let mut prev: HashMap<NodeIndex, (NodeIndex, EdgeIndex)> = HashMap::new();
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut heap = BinaryHeap::new();
        let mut seq = 0u64;

        dist.insert(start_idx, 0.0);
        heap.push(QueueEntry {
            distance: 0.0,
            seq,
            node: start_idx,
        });

        while let Some(QueueEntry { distance, node, .. }) = heap.pop() {
            if !visited.insert(node) {
                continue;
            }
            if dist.get(&node).copied() != Some(distance) {
                continue;
            }

            for (edge_idx, next, edge) in graph.outgoing(node) {
                let candidate = distance + edge.weight;
                // finite weights can still sum past f64::MAX
                if !candidate.is_finite() {
                    continue;
                }
                let improves = dist.get(&next).map_or(true, |&best| candidate < best);
                if improves {
                    dist.insert(next, candidate);
                    prev.insert(next, (node, edge_idx));
                    seq += 1;
                    heap.push(QueueEntry {
                        distance: candidate,
                        seq,
                        node: next,
                    });
                }
            }
        }

        debug!(
            "Dijkstra from {}: reached {} of {} nodes, {} queue pushes",
            start,
            dist.len(),
            graph.stats().node_count,
            seq + 1
        );

        Ok(Self {
            graph,
            start: start_idx,
            dist,
            prev,
        })
    }

    /// Start node id.
    pub fn start(&self) -> &str {
        self.graph.node_id(self.start).unwrap_or_default()
    }

    /// Minimum cost to `node`; `f64::INFINITY` if unreachable or unknown.
    pub fn distance(&self, node: &str) -> f64 {
        self.graph
            .index_of(node)
            .and_then(|idx| self.dist.get(&idx).copied())
            .unwrap_or(f64::INFINITY)
    }

    /// Number of nodes with a finite distance, start included.
    pub fn reachable_count(&self) -> usize {
        self.dist.len()
    }

    /// Rebuild the path to `target` from predecessor links.
    ///
    /// Fails with `UnknownNode` if `target` is absent from the graph.
    pub fn path_to(&self, target: &str) -> Result<PathOutcome> {
        let target_idx = self
            .graph
            .index_of(target)
            .ok_or_else(|| Error::UnknownNode(target.to_string()))?;

        let Some(&cost) = self.dist.get(&target_idx) else {
            return Ok(PathOutcome::Unreachable);
        };

        let mut edges = Vec::new();
        let mut cur = target_idx;
        while cur != self.start {
            let Some(&(parent, edge_idx)) = self.prev.get(&cur) else {
                return Ok(PathOutcome::Unreachable);
            };
            if let Some(edge) = self.graph.edge(edge_idx) {
                edges.push(edge.clone());
            }
            cur = parent;
        }
        edges.reverse();

        Ok(PathOutcome::Reachable { cost, edges })
    }

    /// Sort `targets` by ascending cost. Unreachable targets come last; equal
    /// costs keep their input order.
    pub fn rank<S: AsRef<str>>(&self, targets: &[S]) -> Result<Vec<RankedTarget>> {
        let mut ranked = targets
            .iter()
            .map(|t| {
                let node = t.as_ref();
                if !self.graph.contains(node) {
                    return Err(Error::UnknownNode(node.to_string()));
                }
                Ok(RankedTarget {
                    node: node.to_string(),
                    cost: self.distance(node),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        ranked.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> AttackGraph {
        let mut g = AttackGraph::new();
        g.add_edge("A", "B", "ab", 1.0).unwrap();
        g.add_edge("B", "C", "bc", 1.0).unwrap();
        g.add_edge("A", "C", "ac", 5.0).unwrap();
        g
    }

    #[test]
    fn test_queue_entry_min_heap_order() {
        let mut heap = BinaryHeap::new();
        let n = NodeIndex::new(0);
        heap.push(QueueEntry { distance: 5.0, seq: 0, node: n });
        heap.push(QueueEntry { distance: 1.0, seq: 1, node: n });
        heap.push(QueueEntry { distance: 1.0, seq: 2, node: n });
        heap.push(QueueEntry { distance: 3.0, seq: 3, node: n });

        let order: Vec<(f64, u64)> = std::iter::from_fn(|| heap.pop())
            .map(|e| (e.distance, e.seq))
            .collect();
        assert_eq!(order, vec![(1.0, 1), (1.0, 2), (3.0, 3), (5.0, 0)]);
    }

    #[test]
    fn test_prefers_cheaper_two_hop_path() {
        let g = triangle();
        let tree = ShortestPathTree::compute(&g, "A").unwrap();
        let outcome = tree.path_to("C").unwrap();

        assert_eq!(outcome.cost(), 2.0);
        let labels: Vec<&str> = outcome.edges().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["ab", "bc"]);
    }

    #[test]
    fn test_start_to_itself() {
        let g = triangle();
        let tree = ShortestPathTree::compute(&g, "A").unwrap();
        let outcome = tree.path_to("A").unwrap();
        assert_eq!(
            outcome,
            PathOutcome::Reachable {
                cost: 0.0,
                edges: Vec::new()
            }
        );
        assert_eq!(tree.start(), "A");
    }

    #[test]
    fn test_isolated_node_unreachable() {
        let mut g = triangle();
        g.add_node("D");
        let tree = ShortestPathTree::compute(&g, "A").unwrap();

        assert_eq!(tree.path_to("D").unwrap(), PathOutcome::Unreachable);
        assert!(tree.distance("D").is_infinite());
        assert_eq!(tree.reachable_count(), 3);
    }

    #[test]
    fn test_edges_against_direction_unreachable() {
        let g = triangle();
        let tree = ShortestPathTree::compute(&g, "C").unwrap();
        assert!(!tree.path_to("A").unwrap().is_reachable());
    }

    #[test]
    fn test_unknown_start_and_target() {
        let g = triangle();
        assert!(matches!(
            ShortestPathTree::compute(&g, "Z"),
            Err(Error::UnknownNode(n)) if n == "Z"
        ));

        let tree = ShortestPathTree::compute(&g, "A").unwrap();
        assert!(matches!(tree.path_to("Z"), Err(Error::UnknownNode(_))));
        assert!(tree.distance("Z").is_infinite());
    }

    #[test]
    fn test_stale_entries_do_not_corrupt_result() {
        // D is first queued at 10, then improved to 3 via B and C.
        let mut g = AttackGraph::new();
        g.add_edge("A", "D", "direct", 10.0).unwrap();
        g.add_edge("A", "B", "ab", 1.0).unwrap();
        g.add_edge("B", "C", "bc", 1.0).unwrap();
        g.add_edge("C", "D", "cd", 1.0).unwrap();
        g.add_edge("D", "E", "de", 1.0).unwrap();

        let tree = ShortestPathTree::compute(&g, "A").unwrap();
        assert_eq!(tree.distance("D"), 3.0);
        assert_eq!(tree.distance("E"), 4.0);
        assert_eq!(tree.path_to("E").unwrap().hops(), 4);
    }

    #[test]
    fn test_overflowing_cost_is_unreachable() {
        let mut g = AttackGraph::new();
        g.add_edge("A", "B", "huge", f64::MAX).unwrap();
        g.add_edge("B", "C", "huge", f64::MAX).unwrap();
        g.add_node("D");

        let tree = ShortestPathTree::compute(&g, "A").unwrap();
        assert_eq!(tree.distance("B"), f64::MAX);
        assert_eq!(tree.path_to("C").unwrap(), PathOutcome::Unreachable);
        assert!(tree.distance("C").is_infinite());

        let ranked = tree.rank(&["C", "D", "B"]).unwrap();
        assert_eq!(ranked[0].node, "B");
        assert!(ranked[0].is_reachable());
        assert!(ranked[1..].iter().all(|r| !r.is_reachable()));
    }

    #[test]
    fn test_overflow_does_not_hide_finite_alternative() {
        let mut g = AttackGraph::new();
        g.add_edge("A", "B", "huge", f64::MAX).unwrap();
        g.add_edge("B", "C", "huge", f64::MAX).unwrap();
        g.add_edge("A", "C", "direct", 7.0).unwrap();

        let tree = ShortestPathTree::compute(&g, "A").unwrap();
        let outcome = tree.path_to("C").unwrap();
        assert_eq!(outcome.cost(), 7.0);
        assert_eq!(outcome.edges()[0].label, "direct");
    }

    #[test]
    fn test_zero_weight_cycle_terminates() {
        let mut g = AttackGraph::new();
        g.add_edge("A", "B", "x", 0.0).unwrap();
        g.add_edge("B", "A", "y", 0.0).unwrap();
        g.add_edge("B", "B", "loop", 0.0).unwrap();

        let tree = ShortestPathTree::compute(&g, "A").unwrap();
        assert_eq!(tree.distance("B"), 0.0);
        assert_eq!(tree.path_to("B").unwrap().hops(), 1);
    }

    #[test]
    fn test_parallel_edges_use_cheapest() {
        let mut g = AttackGraph::new();
        g.add_edge("A", "B", "slow", 7.0).unwrap();
        g.add_edge("A", "B", "fast", 2.0).unwrap();

        let tree = ShortestPathTree::compute(&g, "A").unwrap();
        let outcome = tree.path_to("B").unwrap();
        assert_eq!(outcome.cost(), 2.0);
        assert_eq!(outcome.edges()[0].label, "fast");
    }

    #[test]
    fn test_rank_orders_and_puts_unreachable_last() {
        let mut g = triangle();
        g.add_node("D");
        let tree = ShortestPathTree::compute(&g, "A").unwrap();

        let ranked = tree.rank(&["D", "C", "A", "B"]).unwrap();
        let nodes: Vec<&str> = ranked.iter().map(|r| r.node.as_str()).collect();
        assert_eq!(nodes, vec!["A", "B", "C", "D"]);
        assert!(!ranked[3].is_reachable());
        assert!(ranked.windows(2).all(|w| w[0].cost <= w[1].cost));
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let mut g = AttackGraph::new();
        g.add_edge("S", "X", "x", 4.0).unwrap();
        g.add_edge("S", "Y", "y", 4.0).unwrap();
        let tree = ShortestPathTree::compute(&g, "S").unwrap();

        let ranked = tree.rank(&["Y", "X"]).unwrap();
        assert_eq!(ranked[0].node, "Y");
        assert_eq!(ranked[1].node, "X");
    }

    #[test]
    fn test_rank_unknown_target() {
        let g = triangle();
        let tree = ShortestPathTree::compute(&g, "A").unwrap();
        assert!(matches!(tree.rank(&["B", "nope"]), Err(Error::UnknownNode(_))));
    }
}
