//! Hub routing configuration and environment settings.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{validate_weight, Error, Result};

/// `(to_hub, from_hub)` weights for one node's hub routes.
///
/// Serialized as a two-element array, e.g. `[250, 250]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightPair(pub f64, pub f64);

impl WeightPair {
    /// Weight of the `node -> hub` edge.
    pub fn to_hub(&self) -> f64 {
        self.0
    }

    /// Weight of the `hub -> node` edge.
    pub fn from_hub(&self) -> f64 {
        self.1
    }
}

/// Connectivity augmentation settings.
///
/// Every covered node gets a route to and from `hub`. Per-node overrides take
/// precedence over the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubConfig {
    #[serde(default = "default_hub")]
    pub hub: String,
    #[serde(default = "default_hub_weight")]
    pub default_to_hub: f64,
    #[serde(default = "default_hub_weight")]
    pub default_from_hub: f64,
    #[serde(default)]
    pub per_node_overrides: HashMap<String, WeightPair>,
}

fn default_hub() -> String {
    "net:core".into()
}
fn default_hub_weight() -> f64 {
    30.0
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            hub: default_hub(),
            default_to_hub: default_hub_weight(),
            default_from_hub: default_hub_weight(),
            per_node_overrides: HashMap::new(),
        }
    }
}

impl HubConfig {
    /// Config with the given hub and symmetric-or-not default weights.
    pub fn new(hub: impl Into<String>, default_to_hub: f64, default_from_hub: f64) -> Self {
        Self {
            hub: hub.into(),
            default_to_hub,
            default_from_hub,
            per_node_overrides: HashMap::new(),
        }
    }

    /// Builder-style override for a single node.
    pub fn with_override(mut self, node: impl Into<String>, to_hub: f64, from_hub: f64) -> Self {
        self.per_node_overrides
            .insert(node.into(), WeightPair(to_hub, from_hub));
        self
    }

    /// Resolve the hub route weights for `node`.
    pub fn weights_for(&self, node: &str) -> WeightPair {
        self.per_node_overrides
            .get(node)
            .copied()
            .unwrap_or(WeightPair(self.default_to_hub, self.default_from_hub))
    }

    /// Check the hub id and every configured weight.
    pub fn validate(&self) -> Result<()> {
        if self.hub.trim().is_empty() {
            return Err(Error::Config("hub identifier must not be empty".into()));
        }
        validate_weight("*", &self.hub, self.default_to_hub)?;
        validate_weight(&self.hub, "*", self.default_from_hub)?;
        for (node, pair) in &self.per_node_overrides {
            validate_weight(node, &self.hub, pair.to_hub())?;
            validate_weight(&self.hub, node, pair.from_hub())?;
        }
        Ok(())
    }

    /// Load a hub config from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: HubConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        debug!(
            "Loaded hub config from {}: hub={}, overrides={}",
            path.display(),
            config.hub,
            config.per_node_overrides.len()
        );
        Ok(config)
    }
}

/// Process-level settings for the CLI.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Scenario file to load instead of the built-in demo.
    pub scenario_path: Option<PathBuf>,
    /// START node used when none is given.
    pub default_start: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            scenario_path: None,
            default_start: "attacker".into(),
        }
    }
}

impl AnalysisConfig {
    /// Create configuration from environment and defaults.
    ///
    /// Reads `ATTACKPATH_SCENARIO` and `ATTACKPATH_START`.
    pub fn from_env() -> Self {
        let scenario_path = std::env::var("ATTACKPATH_SCENARIO")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        let default_start = std::env::var("ATTACKPATH_START")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| "attacker".into());

        Self {
            scenario_path,
            default_start,
        }
    }
}
