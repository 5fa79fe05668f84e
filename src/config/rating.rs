//! Rating system configuration

use crate::error::RatingError;
use crate::types::{LOSS, WIN};
use serde::{Deserialize, Serialize};

/// K-factor used when none is configured
pub const DEFAULT_K_FACTOR: f64 = 15.0;

/// Elo parameters: the K-factor and the accepted score range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingConfig {
    /// Maximum rating change per match
    pub k_factor: f64,
    /// Lowest score a competitor may be awarded
    pub min_score: f64,
    /// Highest score a competitor may be awarded
    pub max_score: f64,
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
            min_score: LOSS,
            max_score: WIN,
        }
    }
}

impl RatingConfig {
    /// Default configuration with a different K-factor
    pub fn with_k_factor(k_factor: f64) -> Self {
        Self {
            k_factor,
            ..Self::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(RatingError::InvalidKFactor {
                value: self.k_factor,
            }
            .into());
        }

        if !self.min_score.is_finite() || !self.max_score.is_finite() {
            return Err(RatingError::ConfigurationError {
                message: "Score bounds must be finite".to_string(),
            }
            .into());
        }

        if self.min_score >= self.max_score {
            return Err(RatingError::ConfigurationError {
                message: format!(
                    "Minimum score ({}) must be below maximum score ({})",
                    self.min_score, self.max_score
                ),
            }
            .into());
        }

        Ok(())
    }
}
