//! Common types used throughout the rating calculator

use serde::{Deserialize, Serialize};
use skillratings::Outcomes;

/// Score awarded for a win
pub const WIN: f64 = 1.0;

/// Score awarded for a loss
pub const LOSS: f64 = 0.0;

/// Score awarded for a draw
pub const DRAW: f64 = 0.5;

/// Match outcome from competitor A's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Draw,
    Loss,
}

impl Outcome {
    /// Scores for (A, B) implied by this outcome
    pub fn scores(self) -> (f64, f64) {
        match self {
            Outcome::Win => (WIN, LOSS),
            Outcome::Draw => (DRAW, DRAW),
            Outcome::Loss => (LOSS, WIN),
        }
    }

    /// The same result seen from competitor B's side
    pub fn reversed(self) -> Self {
        match self {
            Outcome::Win => Outcome::Loss,
            Outcome::Draw => Outcome::Draw,
            Outcome::Loss => Outcome::Win,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Win => f.pad("win"),
            Outcome::Draw => f.pad("draw"),
            Outcome::Loss => f.pad("loss"),
        }
    }
}

impl std::str::FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "win" | "w" => Ok(Outcome::Win),
            "draw" | "d" => Ok(Outcome::Draw),
            "loss" | "l" => Ok(Outcome::Loss),
            other => Err(format!("Unknown outcome: {} (expected win, draw or loss)", other)),
        }
    }
}

impl From<Outcome> for Outcomes {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => Outcomes::WIN,
            Outcome::Draw => Outcomes::DRAW,
            Outcome::Loss => Outcomes::LOSS,
        }
    }
}

impl From<Outcomes> for Outcome {
    fn from(outcome: Outcomes) -> Self {
        match outcome {
            Outcomes::WIN => Outcome::Win,
            Outcomes::DRAW => Outcome::Draw,
            Outcomes::LOSS => Outcome::Loss,
        }
    }
}

/// Pre-match ratings and match scores for both competitors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchInput {
    pub rating_a: f64,
    pub rating_b: f64,
    pub score_a: f64,
    pub score_b: f64,
}

impl MatchInput {
    pub fn new(rating_a: f64, rating_b: f64, score_a: f64, score_b: f64) -> Self {
        Self {
            rating_a,
            rating_b,
            score_a,
            score_b,
        }
    }

    /// Build an input from an outcome seen from A's side
    pub fn from_outcome(rating_a: f64, rating_b: f64, outcome: Outcome) -> Self {
        let (score_a, score_b) = outcome.scores();
        Self::new(rating_a, rating_b, score_a, score_b)
    }

    /// The same match with the competitors' roles swapped
    pub fn swapped(&self) -> Self {
        Self::new(self.rating_b, self.rating_a, self.score_b, self.score_a)
    }
}

/// Expected scores derived from the two ratings; the pair sums to 1
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpectedScores {
    pub expected_a: f64,
    pub expected_b: f64,
}

/// Post-match ratings for both competitors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingResult {
    pub new_rating_a: f64,
    pub new_rating_b: f64,
}

impl RatingResult {
    /// Rating change (new - old) for each competitor
    pub fn deltas(&self, input: &MatchInput) -> (f64, f64) {
        (
            self.new_rating_a - input.rating_a,
            self.new_rating_b - input.rating_b,
        )
    }
}

/// Predicted ratings for one possible outcome of a pairing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingScenario {
    /// Outcome from A's perspective
    pub outcome: Outcome,
    pub predicted: RatingResult,
    pub delta_a: f64,
    pub delta_b: f64,
}

/// Rating range summary for one competitor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRatingRange {
    pub current_rating: f64,
    pub best_case_rating: f64,
    pub worst_case_rating: f64,
    pub max_gain: f64,
    pub max_loss: f64,
}

/// All possible rating outcomes for a pairing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingScenariosTable {
    pub expected: ExpectedScores,
    /// One entry each for win, draw and loss (A's perspective)
    pub scenarios: Vec<RatingScenario>,
    pub range_a: CompetitorRatingRange,
    pub range_b: CompetitorRatingRange,
}
