//! Elo Rating - two-competitor Elo rating calculator
//!
//! This crate computes expected scores and post-match ratings for a
//! pair of competitors using the Elo formula with a fixed K-factor.

pub mod config;
pub mod error;
pub mod rating;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Competitor, RatingError, Result};
pub use types::*;

// Re-export key components
pub use config::{RatingConfig, DEFAULT_K_FACTOR};
pub use rating::{evaluate, expected_scores, new_ratings, EloRatingCalculator, RatingCalculator};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
