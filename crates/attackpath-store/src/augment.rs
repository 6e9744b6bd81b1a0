//! Hub connectivity augmentation.
//!
//! Routes every covered node to and from a synthetic hub so any covered node
//! can reach any other through `a -> hub -> b`. Hub weights are meant to be
//! large next to organic edges so organic paths win whenever they exist.

use attackpath_core::{HubConfig, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::graph::AttackGraph;
use crate::types::Upsert;

pub const NOOP_LABEL: &str = "noop";
pub const ROUTE_TO_HUB: &str = "route_to_hub";
pub const ROUTE_FROM_HUB: &str = "route_from_hub";

/// What an augmentation pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AugmentReport {
    /// Distinct non-hub nodes that now have hub routes.
    pub covered: usize,
    pub inserted: usize,
    pub updated: usize,
}

impl AugmentReport {
    fn record(&mut self, upsert: Upsert) {
        match upsert {
            Upsert::Inserted => self.inserted += 1,
            Upsert::Updated => self.updated += 1,
        }
    }
}

/// Add `n -> hub` and `hub -> n` for every node in `nodes`.
///
/// Repeated calls replace hub route weights instead of duplicating edges.
/// The whole config is validated before the graph is touched.
pub fn augment_for_connectivity<S: AsRef<str>>(
    graph: &mut AttackGraph,
    nodes: &[S],
    config: &HubConfig,
) -> Result<AugmentReport> {
    config.validate()?;

    let hub = config.hub.as_str();
    let mut report = AugmentReport::default();
    report.record(graph.upsert_edge(hub, hub, NOOP_LABEL, 0.0)?);

    let mut seen = std::collections::HashSet::new();
    for node in nodes {
        let node = node.as_ref();
        if node == hub {
            continue;
        }
        let weights = config.weights_for(node);
        report.record(graph.upsert_edge(node, hub, ROUTE_TO_HUB, weights.to_hub())?);
        report.record(graph.upsert_edge(hub, node, ROUTE_FROM_HUB, weights.from_hub())?);
        if seen.insert(node) {
            report.covered += 1;
        }
        debug!(
            "hub route {} <-> {}: to={} from={}",
            node,
            hub,
            weights.to_hub(),
            weights.from_hub()
        );
    }

    info!(
        "Augmented connectivity via {}: covered={}, inserted={}, updated={}",
        hub, report.covered, report.inserted, report.updated
    );
    Ok(report)
}
