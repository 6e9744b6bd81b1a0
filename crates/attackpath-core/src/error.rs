//! Error types for attack-path analysis.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Invalid weight {weight} on edge {src} -> {dst}: weights must be finite and non-negative")]
    InvalidWeight { src: String, dst: String, weight: f64 },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Reject weights that would break Dijkstra's non-negativity precondition.
pub fn validate_weight(src: &str, dst: &str, weight: f64) -> Result<()> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidWeight {
            src: src.to_string(),
            dst: dst.to_string(),
            weight,
        })
    }
}
