//! Elo rating system implementation
//!
//! Expected scores come from the logistic curve on a 400-point scale,
//! and each rating moves by `K * (score - expected)`.

use crate::config::rating::RatingConfig;
use crate::error::{Competitor, RatingError};
use crate::rating::calculator::RatingCalculator;
use crate::types::{
    CompetitorRatingRange, ExpectedScores, MatchInput, Outcome, RatingResult, RatingScenario,
    RatingScenariosTable,
};
use serde::Deserialize;
use tracing::{debug, warn};

/// Rating difference at which the stronger side is expected to score ten times as much
const RATING_SCALE: f64 = 400.0;

/// Expected scores of A and B given their current ratings
///
/// Both values lie in (0, 1) mathematically, but in `f64` the stronger side
/// rounds to exactly `1.0` (and the weaker towards `0.0`) once the rating gap
/// passes roughly 6500 points.
pub fn expected_scores(rating_a: f64, rating_b: f64) -> ExpectedScores {
    ExpectedScores {
        expected_a: 1.0 / (1.0 + 10_f64.powf((rating_b - rating_a) / RATING_SCALE)),
        expected_b: 1.0 / (1.0 + 10_f64.powf((rating_a - rating_b) / RATING_SCALE)),
    }
}

/// New ratings from the expected and actual scores
pub fn new_ratings(
    rating_a: f64,
    rating_b: f64,
    expected: ExpectedScores,
    score_a: f64,
    score_b: f64,
    k_factor: f64,
) -> RatingResult {
    RatingResult {
        new_rating_a: rating_a + k_factor * (score_a - expected.expected_a),
        new_rating_b: rating_b + k_factor * (score_b - expected.expected_b),
    }
}

/// Evaluate a match with the default K-factor and score range
pub fn evaluate(
    rating_a: f64,
    rating_b: f64,
    score_a: f64,
    score_b: f64,
) -> crate::error::Result<RatingResult> {
    EloRatingCalculator::default().evaluate(&MatchInput::new(rating_a, rating_b, score_a, score_b))
}

/// Partial configuration accepted by `update_config`; omitted fields keep their value
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RatingConfigUpdate {
    #[serde(rename = "type")]
    kind: Option<String>,
    k_factor: Option<f64>,
    min_score: Option<f64>,
    max_score: Option<f64>,
}

/// Elo rating calculator
#[derive(Debug, Clone, Default)]
pub struct EloRatingCalculator {
    config: RatingConfig,
}

impl EloRatingCalculator {
    /// Create a new Elo rating calculator
    pub fn new(config: RatingConfig) -> crate::error::Result<Self> {
        config.validate()?;

        Ok(Self { config })
    }

    /// Calculator using the given K-factor and the default score range
    pub fn with_k_factor(k_factor: f64) -> crate::error::Result<Self> {
        Self::new(RatingConfig::with_k_factor(k_factor))
    }

    pub fn k_factor(&self) -> f64 {
        self.config.k_factor
    }

    pub fn rating_config(&self) -> &RatingConfig {
        &self.config
    }

    /// Expected scores for a pairing
    pub fn expected_scores(&self, rating_a: f64, rating_b: f64) -> ExpectedScores {
        expected_scores(rating_a, rating_b)
    }

    /// Validate the input, then compute expected scores and new ratings
    pub fn evaluate(&self, input: &MatchInput) -> crate::error::Result<RatingResult> {
        if let Err(e) = self.validate_input(input) {
            warn!("Rejected match input {:?}: {}", input, e);
            return Err(e.into());
        }

        if (input.score_a + input.score_b - 1.0).abs() > f64::EPSILON {
            debug!(
                score_a = input.score_a,
                score_b = input.score_b,
                "Match scores do not sum to 1"
            );
        }

        let expected = expected_scores(input.rating_a, input.rating_b);
        let result = new_ratings(
            input.rating_a,
            input.rating_b,
            expected,
            input.score_a,
            input.score_b,
            self.config.k_factor,
        );

        debug!(
            rating_a = input.rating_a,
            rating_b = input.rating_b,
            expected_a = expected.expected_a,
            expected_b = expected.expected_b,
            new_rating_a = result.new_rating_a,
            new_rating_b = result.new_rating_b,
            "Evaluated match"
        );

        Ok(result)
    }

    /// Evaluate a match whose outcome is given from A's perspective
    pub fn evaluate_outcome(
        &self,
        rating_a: f64,
        rating_b: f64,
        outcome: Outcome,
    ) -> crate::error::Result<RatingResult> {
        self.evaluate(&MatchInput::from_outcome(rating_a, rating_b, outcome))
    }

    /// Predicted ratings for every outcome of a pairing, with best and worst cases
    pub fn rating_scenarios(
        &self,
        rating_a: f64,
        rating_b: f64,
    ) -> crate::error::Result<RatingScenariosTable> {
        let mut scenarios = Vec::with_capacity(3);
        for outcome in [Outcome::Win, Outcome::Draw, Outcome::Loss] {
            let input = MatchInput::from_outcome(rating_a, rating_b, outcome);
            let predicted = self.evaluate(&input)?;
            let (delta_a, delta_b) = predicted.deltas(&input);
            scenarios.push(RatingScenario {
                outcome,
                predicted,
                delta_a,
                delta_b,
            });
        }

        let range_a = rating_range(
            rating_a,
            scenarios.iter().map(|s| s.predicted.new_rating_a),
        );
        let range_b = rating_range(
            rating_b,
            scenarios.iter().map(|s| s.predicted.new_rating_b),
        );

        Ok(RatingScenariosTable {
            expected: expected_scores(rating_a, rating_b),
            scenarios,
            range_a,
            range_b,
        })
    }

    fn validate_input(&self, input: &MatchInput) -> Result<(), RatingError> {
        let ratings = [(Competitor::A, input.rating_a), (Competitor::B, input.rating_b)];
        for (competitor, rating) in ratings {
            if !rating.is_finite() {
                return Err(RatingError::NonFiniteRating {
                    competitor,
                    value: rating,
                });
            }
        }

        let scores = [(Competitor::A, input.score_a), (Competitor::B, input.score_b)];
        for (competitor, score) in scores {
            if !score.is_finite() {
                return Err(RatingError::NonFiniteScore {
                    competitor,
                    value: score,
                });
            }
            if score < self.config.min_score || score > self.config.max_score {
                return Err(RatingError::ScoreOutOfRange {
                    competitor,
                    value: score,
                    min: self.config.min_score,
                    max: self.config.max_score,
                });
            }
        }

        Ok(())
    }
}

fn rating_range(current: f64, predicted: impl Iterator<Item = f64>) -> CompetitorRatingRange {
    let (worst, best) = predicted.fold((current, current), |(lo, hi), r| (lo.min(r), hi.max(r)));

    CompetitorRatingRange {
        current_rating: current,
        best_case_rating: best,
        worst_case_rating: worst,
        max_gain: best - current,
        max_loss: current - worst,
    }
}

impl RatingCalculator for EloRatingCalculator {
    fn calculate(&self, input: &MatchInput) -> crate::error::Result<RatingResult> {
        self.evaluate(input)
    }

    fn config(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "elo",
            "k_factor": self.config.k_factor,
            "min_score": self.config.min_score,
            "max_score": self.config.max_score
        })
    }

    fn update_config(&mut self, config: serde_json::Value) -> crate::error::Result<()> {
        let update: RatingConfigUpdate = serde_json::from_value(config).map_err(|e| {
            RatingError::ConfigurationError {
                message: format!("Invalid Elo configuration: {}", e),
            }
        })?;

        if let Some(kind) = update.kind.filter(|kind| kind != "elo") {
            return Err(RatingError::ConfigurationError {
                message: format!("Cannot apply {} configuration to an Elo calculator", kind),
            }
            .into());
        }

        let mut updated = self.config;
        if let Some(k) = update.k_factor {
            updated.k_factor = k;
        }
        if let Some(min) = update.min_score {
            updated.min_score = min;
        }
        if let Some(max) = update.max_score {
            updated.max_score = max;
        }

        updated.validate()?;
        self.config = updated;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DRAW, LOSS, WIN};

    const TOLERANCE: f64 = 1e-9;
    const DEFAULT_K: f64 = crate::config::rating::DEFAULT_K_FACTOR;

    #[test]
    fn test_equal_ratings_expect_half() {
        let expected = expected_scores(1500.0, 1500.0);
        assert_eq!(expected.expected_a, 0.5);
        assert_eq!(expected.expected_b, 0.5);
    }

    #[test]
    fn test_expected_scores_sum_to_one() {
        for (a, b) in [(1600.0, 1400.0), (0.0, -250.0), (2800.0, 100.0), (1.5, 1.25)] {
            let expected = expected_scores(a, b);
            assert!((expected.expected_a + expected.expected_b - 1.0).abs() < TOLERANCE);
            assert!(expected.expected_a > 0.0 && expected.expected_a < 1.0);
            assert!(expected.expected_b > 0.0 && expected.expected_b < 1.0);
        }
    }

    #[test]
    fn test_higher_rating_expects_more() {
        let expected = expected_scores(1700.0, 1500.0);
        assert!(expected.expected_a > 0.7);
        assert!(expected.expected_a < 0.8);
        assert!(expected.expected_a > expected.expected_b);
    }

    #[test]
    fn test_equal_ratings_win() {
        let result = evaluate(1200.0, 1200.0, WIN, LOSS).unwrap();
        assert_eq!(result.new_rating_a, 1207.5);
        assert_eq!(result.new_rating_b, 1192.5);
    }

    #[test]
    fn test_draw_against_weaker_opponent() {
        let expected = expected_scores(1600.0, 1400.0);
        assert!((expected.expected_a - 0.7597).abs() < 1e-4);
        assert!((expected.expected_b - 0.2403).abs() < 1e-4);

        let result = evaluate(1600.0, 1400.0, DRAW, DRAW).unwrap();
        assert!((result.new_rating_a - 1596.1).abs() < 0.01);
        assert!((result.new_rating_b - 1403.9).abs() < 0.01);
    }

    #[test]
    fn test_score_matching_expectation_leaves_rating_unchanged() {
        let expected = expected_scores(1650.0, 1500.0);
        let result = new_ratings(
            1650.0,
            1500.0,
            expected,
            expected.expected_a,
            expected.expected_b,
            DEFAULT_K,
        );
        assert_eq!(result.new_rating_a, 1650.0);
        assert_eq!(result.new_rating_b, 1500.0);
    }

    #[test]
    fn test_new_ratings_direction() {
        let expected = expected_scores(1500.0, 1500.0);
        let result = new_ratings(1500.0, 1500.0, expected, 0.75, 0.25, DEFAULT_K);
        assert!(result.new_rating_a > 1500.0);
        assert!(result.new_rating_b < 1500.0);
    }

    #[test]
    fn test_custom_k_factor() {
        let calculator = EloRatingCalculator::with_k_factor(16.0).unwrap();
        assert_eq!(calculator.k_factor(), 16.0);

        let result = calculator
            .evaluate_outcome(1500.0, 1500.0, Outcome::Win)
            .unwrap();
        assert_eq!(result.new_rating_a, 1508.0);
        assert_eq!(result.new_rating_b, 1492.0);
    }

    #[test]
    fn test_negative_and_zero_ratings_accepted() {
        let result = evaluate(0.0, -300.0, LOSS, WIN).unwrap();
        assert!(result.new_rating_a < 0.0);
        assert!(result.new_rating_b > -300.0);
    }

    #[test]
    fn test_non_finite_rating_rejected() {
        let err = evaluate(f64::NAN, 1500.0, WIN, LOSS).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RatingError>(),
            Some(RatingError::NonFiniteRating {
                competitor: Competitor::A,
                ..
            })
        ));

        let err = evaluate(1500.0, f64::INFINITY, WIN, LOSS).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RatingError>(),
            Some(RatingError::NonFiniteRating {
                competitor: Competitor::B,
                ..
            })
        ));
    }

    #[test]
    fn test_non_finite_score_rejected() {
        let err = evaluate(1500.0, 1500.0, WIN, f64::NAN).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RatingError>(),
            Some(RatingError::NonFiniteScore {
                competitor: Competitor::B,
                ..
            })
        ));
    }

    #[test]
    fn test_score_out_of_range_rejected() {
        let err = evaluate(1500.0, 1500.0, 2.0, -1.0).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RatingError>(),
            Some(RatingError::ScoreOutOfRange {
                competitor: Competitor::A,
                ..
            })
        ));
        assert!(err.to_string().contains("Score out of expected range"));
    }

    #[test]
    fn test_scores_not_summing_to_one_accepted() {
        let result = evaluate(1500.0, 1500.0, WIN, WIN).unwrap();
        assert_eq!(result.new_rating_a, 1507.5);
        assert_eq!(result.new_rating_b, 1507.5);
    }

    #[test]
    fn test_wider_score_range() {
        let config = RatingConfig {
            min_score: 0.0,
            max_score: 3.0,
            ..RatingConfig::default()
        };
        let calculator = EloRatingCalculator::new(config).unwrap();
        let result = calculator
            .evaluate(&MatchInput::new(1500.0, 1500.0, 3.0, 0.0))
            .unwrap();
        assert_eq!(result.new_rating_a, 1500.0 + 15.0 * 2.5);
    }

    #[test]
    fn test_rating_scenarios() {
        let calculator = EloRatingCalculator::default();
        let table = calculator.rating_scenarios(2000.0, 1000.0).unwrap();

        assert_eq!(table.scenarios.len(), 3);
        assert_eq!(table.scenarios[0].outcome, Outcome::Win);
        assert_eq!(table.scenarios[2].outcome, Outcome::Loss);

        // Favourite gains little from a win and loses almost K from a loss
        assert!(table.range_a.max_gain < 1.0);
        assert!(table.range_a.max_loss > 14.0);
        assert!(table.range_a.max_loss <= 15.0);
        assert!(table.range_b.max_gain > 14.0);
        assert_eq!(table.range_a.best_case_rating, table.scenarios[0].predicted.new_rating_a);
        assert_eq!(table.range_b.best_case_rating, table.scenarios[2].predicted.new_rating_b);
    }

    #[test]
    fn test_rating_scenarios_reject_non_finite() {
        let calculator = EloRatingCalculator::default();
        assert!(calculator.rating_scenarios(f64::NAN, 1000.0).is_err());
    }

    #[test]
    fn test_calculator_config() {
        let mut calculator = EloRatingCalculator::default();
        let config = calculator.config();
        assert_eq!(config["type"], "elo");
        assert_eq!(config["k_factor"], 15.0);

        calculator
            .update_config(serde_json::json!({ "k_factor": 16.0 }))
            .unwrap();
        assert_eq!(calculator.k_factor(), 16.0);
    }

    #[test]
    fn test_invalid_config_update_is_not_applied() {
        let mut calculator = EloRatingCalculator::default();
        let result = calculator.update_config(serde_json::json!({ "k_factor": -1.0 }));
        assert!(result.is_err());
        assert_eq!(calculator.k_factor(), 15.0);
    }

    #[test]
    fn test_malformed_config_update_rejected() {
        let mut calculator = EloRatingCalculator::default();
        let payloads = [
            serde_json::json!({ "k_factor": "32" }),
            serde_json::json!({ "kfactor": 32.0 }),
            serde_json::json!(42),
            serde_json::json!({ "type": "weng_lin", "k_factor": 32.0 }),
        ];

        for payload in payloads {
            let err = calculator.update_config(payload.clone()).unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<RatingError>(),
                    Some(RatingError::ConfigurationError { .. })
                ),
                "payload {} gave {}",
                payload,
                err
            );
            assert_eq!(calculator.k_factor(), 15.0);
        }
    }

    #[test]
    fn test_config_round_trips_through_update() {
        let mut calculator = EloRatingCalculator::with_k_factor(16.0).unwrap();
        let exported = calculator.config();

        calculator
            .update_config(serde_json::json!({ "max_score": 2.0 }))
            .unwrap();
        assert_eq!(calculator.k_factor(), 16.0);
        assert_eq!(calculator.rating_config().max_score, 2.0);

        calculator.update_config(exported).unwrap();
        assert_eq!(calculator.rating_config().max_score, 1.0);
    }

    #[test]
    fn test_extreme_rating_gap_saturates_expected_score() {
        let expected = expected_scores(11000.0, 1000.0);
        assert_eq!(expected.expected_a, 1.0);
        assert!(expected.expected_b > 0.0 && expected.expected_b < 1e-20);
    }

    #[test]
    fn test_invalid_config_rejected_on_construction() {
        assert!(EloRatingCalculator::with_k_factor(0.0).is_err());
    }

    #[test]
    fn test_trait_object() {
        let calculator: Box<dyn RatingCalculator> = Box::new(EloRatingCalculator::default());
        let result = calculator
            .calculate(&MatchInput::from_outcome(1200.0, 1200.0, Outcome::Loss))
            .unwrap();
        assert_eq!(result.new_rating_a, 1192.5);
        assert_eq!(result.new_rating_b, 1207.5);
    }
}
