use crate::error::{FuzzyError, Result};
use serde::{Deserialize, Serialize};

/// Tuning knobs for alias scoring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScorerConfig {
    /// Scores below this threshold are treated as noise and vetoed
    pub min_score: f64,

    /// Score reported for vetoed or empty matches
    pub no_match_score: f64,

    /// Cost of deleting or substituting a protected query term.
    /// Large enough to dominate any real alignment, small enough to sum safely.
    pub protected_cost: f64,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            min_score: 0.01,
            no_match_score: -1.0,
            protected_cost: 1_000_000.0,
        }
    }
}

impl ScorerConfig {
    /// Strict config that only keeps strong matches
    pub fn strict() -> Self {
        Self {
            min_score: 0.5,
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.min_score.is_finite() || self.min_score < 0.0 {
            return Err(FuzzyError::invalid_config(format!(
                "min_score ({}) must be a finite, non-negative number",
                self.min_score
            )));
        }

        if !self.protected_cost.is_finite() || self.protected_cost <= 1.0 {
            return Err(FuzzyError::invalid_config(format!(
                "protected_cost ({}) must be finite and greater than 1",
                self.protected_cost
            )));
        }

        if self.no_match_score >= self.min_score {
            return Err(FuzzyError::invalid_config(format!(
                "no_match_score ({}) must be below min_score ({})",
                self.no_match_score, self.min_score
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(ScorerConfig::default().validate().is_ok());
        assert!(ScorerConfig::strict().validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ScorerConfig::default();

        config.min_score = -0.5;
        assert!(config.validate().is_err());

        config.min_score = 0.01;
        config.protected_cost = f64::INFINITY;
        assert!(config.validate().is_err());

        config.protected_cost = 1.0;
        assert!(config.validate().is_err());

        config.protected_cost = 1e6;
        config.no_match_score = 0.5;
        assert!(config.validate().is_err());

        config.no_match_score = -1.0;
        assert!(config.validate().is_ok());
    }
}
