//! Rating calculator trait
//!
//! This module defines the interface used by callers that only need to
//! turn a match into new ratings without caring about the rating system.

use crate::types::{MatchInput, RatingResult};

/// Trait for calculating rating changes after a match
pub trait RatingCalculator: Send + Sync {
    /// Calculate new ratings for both competitors
    ///
    /// # Arguments
    /// * `input` - Pre-match ratings and match scores
    ///
    /// # Returns
    /// The post-match ratings, or an error if the input is rejected
    fn calculate(&self, input: &MatchInput) -> crate::error::Result<RatingResult>;

    /// Get current configuration as JSON
    fn config(&self) -> serde_json::Value;

    /// Update configuration from JSON
    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()>;
}
