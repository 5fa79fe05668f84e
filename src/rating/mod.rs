//! Elo rating calculations
//!
//! This module provides the calculator interface and the Elo
//! implementation for two-competitor matches.

pub mod calculator;
pub mod elo;

// Re-export commonly used types
pub use calculator::RatingCalculator;
pub use elo::{evaluate, expected_scores, new_ratings, EloRatingCalculator};
