//! Error types for the rating calculator
//!
//! Library operations return `anyhow::Result`, with the specific failure
//! carried as a `RatingError` that callers can recover via `downcast_ref`.

/// Result type alias for convenience
pub type Result<T> = anyhow::Result<T>;

/// Which side of a match a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Competitor {
    A,
    B,
}

impl std::fmt::Display for Competitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Competitor::A => write!(f, "A"),
            Competitor::B => write!(f, "B"),
        }
    }
}

/// Custom error types for invalid rating input and configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingError {
    #[error("Non-finite rating for competitor {competitor}: {value}")]
    NonFiniteRating { competitor: Competitor, value: f64 },

    #[error("Non-finite score for competitor {competitor}: {value}")]
    NonFiniteScore { competitor: Competitor, value: f64 },

    #[error("Score out of expected range for competitor {competitor}: {value} not in [{min}, {max}]")]
    ScoreOutOfRange {
        competitor: Competitor,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Invalid K-factor: {value} (must be finite and positive)")]
    InvalidKFactor { value: f64 },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}
