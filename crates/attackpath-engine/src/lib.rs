//! Shortest-path engine — Dijkstra over the attack graph.
//!
//! A `ShortestPathTree` is computed once per start node and answers any number
//! of path and ranking lookups. `Analyzer` is the facade used by front ends;
//! `SharedAnalyzer` adds a read/write lock for multi-threaded callers.

pub mod analyzer;
pub mod dijkstra;
pub mod scenario;
pub mod types;

pub use analyzer::{Analyzer, SharedAnalyzer};
pub use dijkstra::ShortestPathTree;
pub use scenario::Scenario;
pub use types::*;
