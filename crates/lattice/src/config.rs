use crate::error::{LatticeError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokenizer_fuzzy::ScorerConfig;

/// Configuration for lattice construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Alias scoring thresholds and costs
    pub scorer: ScorerConfig,

    /// Collapse duplicate `(token, length)` edges at each vertex
    pub coalesce: bool,

    /// Drop non-default edges scoring below this value
    pub min_edge_score: Option<f64>,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            scorer: ScorerConfig::default(),
            coalesce: true,
            min_edge_score: None,
        }
    }
}

impl LatticeConfig {
    pub fn from_toml_str(raw: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(raw).context("failed to parse lattice config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read lattice config {}", path.display()))?;
        Self::from_toml_str(&raw).with_context(|| format!("invalid lattice config {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        self.scorer.validate()?;

        if let Some(min) = self.min_edge_score {
            if !min.is_finite() {
                return Err(LatticeError::invalid_config(format!(
                    "min_edge_score ({min}) must be finite"
                )));
            }
        }

        Ok(())
    }
}
