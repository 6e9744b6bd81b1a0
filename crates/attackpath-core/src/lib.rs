//! Attack-path core — error taxonomy, hub configuration, environment settings.

pub mod config;
pub mod error;

pub use config::{AnalysisConfig, HubConfig, WeightPair};
pub use error::{validate_weight, Error, Result};
