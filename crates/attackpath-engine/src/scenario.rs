//! Scenarios — serializable attack graphs plus the built-in demo network.

use std::collections::HashSet;
use std::path::Path;

use attackpath_core::{Error, HubConfig, Result};
use attackpath_store::Edge;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analyzer::Analyzer;

/// A complete attack graph description.
///
/// When `hub` is set, every node in the scenario gets hub routes on build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    /// Extra nodes to register even without edges.
    #[serde(default)]
    pub nodes: Vec<String>,
    /// High-value targets ranked by the CLI.
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub: Option<HubConfig>,
}

impl Scenario {
    /// Load a scenario from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let scenario = Self::from_json(&raw)?;
        info!(
            "Loaded scenario '{}' from {}: {} edges, {} assets",
            scenario.name,
            path.display(),
            scenario.edges.len(),
            scenario.assets.len()
        );
        Ok(scenario)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(raw)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn validate(&self) -> Result<()> {
        if let Some(edge) = self
            .edges
            .iter()
            .find(|e| e.src.is_empty() || e.dst.is_empty())
        {
            return Err(Error::Config(format!(
                "edge '{}' has an empty endpoint",
                edge.label
            )));
        }
        if self.nodes.iter().chain(&self.assets).any(|n| n.is_empty()) {
            return Err(Error::Config("node ids must not be empty".into()));
        }
        if let Some(hub) = &self.hub {
            hub.validate()?;
        }
        Ok(())
    }

    /// Every node the scenario mentions, first mention first, no duplicates.
    pub fn all_nodes(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.nodes
            .iter()
            .chain(&self.assets)
            .chain(self.edges.iter().flat_map(|e| [&e.src, &e.dst]))
            .filter(|n| seen.insert(*n))
            .cloned()
            .collect()
    }

    /// Build an analyzer: register nodes, add edges, then augment.
    pub fn build(&self) -> Result<Analyzer> {
        let mut analyzer = Analyzer::new();
        for node in &self.nodes {
            analyzer.add_node(node);
        }
        for edge in &self.edges {
            analyzer.add_edge(&edge.src, &edge.dst, &edge.label, edge.weight)?;
        }
        for asset in &self.assets {
            analyzer.add_node(asset);
        }
        if let Some(hub) = &self.hub {
            analyzer.augment_for_connectivity(&self.all_nodes(), hub)?;
        }

        let stats = analyzer.stats();
        info!(
            "Built scenario '{}': {} nodes, {} edges",
            self.name, stats.node_count, stats.edge_count
        );
        Ok(analyzer)
    }

    /// Enterprise network demo: a phishing foothold, a public web tier, an
    /// admin chain, and six protected assets.
    pub fn demo() -> Self {
        let assets = [
            "Finance_Database",
            "HR_Database",
            "Customer_Database",
            "Orders_Database",
            "vault:secrets",
            "Logs",
        ];
        let others = [
            "attacker",
            "ws:employee_pc",
            "user:employee",
            "share:common",
            "creds:leaked",
            "srv:jumpbox",
            "srv:fileserver",
            "srv:ad",
            "user:admin",
            "web:public_site",
            "web:internal_app",
            "srv:api",
        ];

        let edges = [
            ("attacker", "web:public_site", "network_connect", 2.0),
            ("attacker", "ws:employee_pc", "phishing_success", 1.0),
            ("ws:employee_pc", "user:employee", "logon", 1.0),
            ("user:employee", "share:common", "file_access", 2.0),
            ("share:common", "creds:leaked", "credential_discovery", 1.0),
            ("creds:leaked", "srv:jumpbox", "remote_logon", 2.0),
            ("srv:jumpbox", "srv:fileserver", "network_connect", 2.0),
            ("srv:fileserver", "HR_Database", "network_connect", 3.0),
            ("srv:fileserver", "Finance_Database", "network_connect", 3.0),
            ("web:public_site", "web:internal_app", "pivot_web", 3.0),
            ("web:internal_app", "srv:api", "service_call", 1.0),
            ("srv:api", "Orders_Database", "db_call", 2.0),
            ("web:internal_app", "Customer_Database", "sql_access", 2.0),
            ("srv:jumpbox", "srv:ad", "admin_session", 3.0),
            ("srv:ad", "user:admin", "privilege_escalation", 2.0),
            ("user:admin", "vault:secrets", "vault_access", 1.0),
            ("vault:secrets", "Logs", "log_access", 2.0),
            ("vault:secrets", "Finance_Database", "use_secrets", 1.0),
            // pivots back out of assets
            ("Orders_Database", "srv:api", "db_creds_found", 2.0),
            ("Customer_Database", "web:internal_app", "app_secrets_reuse", 2.0),
            ("Finance_Database", "srv:fileserver", "service_account_reuse", 2.0),
            ("HR_Database", "srv:fileserver", "service_account_reuse", 2.0),
            ("Logs", "srv:ad", "admin_artifacts_found", 3.0),
        ];

        let hub = HubConfig::new("net:core", 30.0, 30.0)
            .with_override("vault:secrets", 250.0, 250.0)
            .with_override("Logs", 180.0, 180.0)
            .with_override("srv:ad", 120.0, 120.0)
            .with_override("Finance_Database", 160.0, 160.0)
            .with_override("HR_Database", 110.0, 110.0)
            .with_override("Customer_Database", 90.0, 90.0)
            .with_override("Orders_Database", 70.0, 70.0)
            .with_override("attacker", 30.0, 10.0);

        Self {
            name: "enterprise-demo".into(),
            nodes: others.iter().map(|n| n.to_string()).collect(),
            assets: assets.iter().map(|n| n.to_string()).collect(),
            edges: edges
                .iter()
                .map(|&(src, dst, label, weight)| Edge::new(src, dst, label, weight))
                .collect(),
            hub: Some(hub),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_builds_strongly_connected() {
        let scenario = Scenario::demo();
        let analyzer = scenario.build().unwrap();
        let nodes = scenario.all_nodes();
        assert_eq!(nodes.len(), 18);

        for start in &nodes {
            let tree = analyzer.tree(start).unwrap();
            for target in &nodes {
                assert!(
                    tree.distance(target).is_finite(),
                    "{} -> {} unreachable",
                    start,
                    target
                );
            }
        }
    }

    #[test]
    fn test_demo_hr_path_uses_phishing_chain() {
        let analyzer = Scenario::demo().build().unwrap();
        let outcome = analyzer.shortest_path("attacker", "HR_Database").unwrap();

        assert_eq!(outcome.cost(), 12.0);
        let hops: Vec<&str> = outcome.edges().iter().map(|e| e.dst.as_str()).collect();
        assert_eq!(
            hops,
            vec![
                "ws:employee_pc",
                "user:employee",
                "share:common",
                "creds:leaked",
                "srv:jumpbox",
                "srv:fileserver",
                "HR_Database",
            ]
        );
    }

    #[test]
    fn test_demo_asset_ranking() {
        let scenario = Scenario::demo();
        let analyzer = scenario.build().unwrap();
        let ranked = analyzer.rank("attacker", &scenario.assets).unwrap();

        let summary: Vec<(&str, f64)> = ranked.iter().map(|r| (r.node.as_str(), r.cost)).collect();
        assert_eq!(
            summary,
            vec![
                ("Customer_Database", 7.0),
                ("Orders_Database", 8.0),
                ("Finance_Database", 12.0),
                ("HR_Database", 12.0),
                ("vault:secrets", 13.0),
                ("Logs", 15.0),
            ]
        );
    }

    #[test]
    fn test_demo_escape_from_asset_goes_through_hub() {
        let analyzer = Scenario::demo().build().unwrap();
        let outcome = analyzer.shortest_path("Logs", "attacker").unwrap();

        assert_eq!(outcome.cost(), 45.0);
        let route: Vec<&str> = outcome.edges().iter().map(|e| e.dst.as_str()).collect();
        assert_eq!(route, vec!["srv:ad", "user:admin", "net:core", "attacker"]);
    }

    #[test]
    fn test_json_roundtrip_keeps_behavior() {
        let scenario = Scenario::demo();
        let restored = Scenario::from_json(&scenario.to_json().unwrap()).unwrap();
        let analyzer = restored.build().unwrap();
        assert_eq!(analyzer.shortest_path("attacker", "Logs").unwrap().cost(), 15.0);
    }

    #[test]
    fn test_minimal_json_without_hub() {
        let scenario = Scenario::from_json(
            r#"{
                "edges": [
                    {"src": "A", "dst": "B", "label": "ab", "weight": 1},
                    {"src": "B", "dst": "C", "label": "bc", "weight": 1},
                    {"src": "A", "dst": "C", "label": "ac", "weight": 5}
                ],
                "nodes": ["D"]
            }"#,
        )
        .unwrap();
        let analyzer = scenario.build().unwrap();

        assert_eq!(analyzer.shortest_path("A", "C").unwrap().cost(), 2.0);
        assert!(!analyzer.shortest_path("A", "D").unwrap().is_reachable());
    }

    #[test]
    fn test_negative_weight_in_file_rejected() {
        let scenario = Scenario::from_json(
            r#"{"edges": [{"src": "A", "dst": "B", "label": "x", "weight": -2}]}"#,
        )
        .unwrap();
        assert!(matches!(scenario.build(), Err(Error::InvalidWeight { .. })));
    }

    #[test]
    fn test_empty_endpoint_rejected() {
        let result = Scenario::from_json(
            r#"{"edges": [{"src": "", "dst": "B", "label": "x", "weight": 1}]}"#,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenario.json");
        std::fs::write(&path, Scenario::demo().to_json().unwrap()).unwrap();

        let scenario = Scenario::load(&path).unwrap();
        assert_eq!(scenario.name, "enterprise-demo");
        assert_eq!(scenario.assets.len(), 6);
    }
}
