//! Command-line entry point for the elo-rating calculator
//!
//! Reads two ratings and a match result, prints the new ratings either
//! as text or as JSON.

use anyhow::{anyhow, Result};
use clap::Parser;
use elo_rating::config::AppConfig;
use elo_rating::{EloRatingCalculator, MatchInput, Outcome, RatingResult, RatingScenariosTable};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info};

/// Elo Rating Calculator - new ratings for two competitors after a match
#[derive(Parser)]
#[command(
    name = "elo-rating",
    version,
    about = "Compute updated Elo ratings for two competitors after a match",
    long_about = "Computes each competitor's expected score from the Elo logistic formula and \
                 moves both ratings by K times the difference between actual and expected score."
)]
struct Args {
    /// Current rating of competitor A
    #[arg(allow_negative_numbers = true, required_unless_present = "dry_run")]
    rating_a: Option<f64>,

    /// Current rating of competitor B
    #[arg(allow_negative_numbers = true, required_unless_present = "dry_run")]
    rating_b: Option<f64>,

    /// Score of competitor A (1 = win, 0.5 = draw, 0 = loss)
    #[arg(long, requires = "score_b", conflicts_with = "outcome")]
    score_a: Option<f64>,

    /// Score of competitor B (1 = win, 0.5 = draw, 0 = loss)
    #[arg(long, requires = "score_a")]
    score_b: Option<f64>,

    /// Match outcome from A's perspective (win, draw, loss)
    #[arg(short, long, value_name = "OUTCOME")]
    outcome: Option<Outcome>,

    /// K-factor override
    #[arg(short, long, value_name = "K")]
    k_factor: Option<f64>,

    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Print predicted ratings for every outcome instead of a single result
    #[arg(long, conflicts_with_all = ["score_a", "score_b", "outcome"])]
    scenarios: bool,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        help = "Validate configuration and exit without computing ratings"
    )]
    dry_run: bool,
}

#[derive(Serialize)]
struct EvaluationReport {
    input: MatchInput,
    k_factor: f64,
    expected_a: f64,
    expected_b: f64,
    result: RatingResult,
    delta_a: f64,
    delta_b: f64,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from environment, file and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if let Some(k) = args.k_factor {
        config.rating.k_factor = k;
    }

    elo_rating::config::validate_config(&config)?;
    Ok(config)
}

fn ratings(args: &Args) -> Result<(f64, f64)> {
    match (args.rating_a, args.rating_b) {
        (Some(rating_a), Some(rating_b)) => Ok((rating_a, rating_b)),
        _ => Err(anyhow!("Both RATING_A and RATING_B are required")),
    }
}

fn match_input(args: &Args) -> Result<MatchInput> {
    let (rating_a, rating_b) = ratings(args)?;
    match (args.outcome, args.score_a, args.score_b) {
        (Some(outcome), _, _) => Ok(MatchInput::from_outcome(rating_a, rating_b, outcome)),
        (None, Some(score_a), Some(score_b)) => {
            Ok(MatchInput::new(rating_a, rating_b, score_a, score_b))
        }
        _ => Err(anyhow!(
            "A match result is required: pass --outcome or both --score-a and --score-b"
        )),
    }
}

fn print_report(report: &EvaluationReport) {
    println!(
        "Competitor A: {:.2} -> {:.2} ({:+.2}), expected {:.4}",
        report.input.rating_a,
        report.result.new_rating_a,
        report.delta_a,
        report.expected_a
    );
    println!(
        "Competitor B: {:.2} -> {:.2} ({:+.2}), expected {:.4}",
        report.input.rating_b,
        report.result.new_rating_b,
        report.delta_b,
        report.expected_b
    );
}

fn print_scenarios(table: &RatingScenariosTable) {
    println!(
        "Expected scores: A {:.4}, B {:.4}",
        table.expected.expected_a, table.expected.expected_b
    );
    for scenario in &table.scenarios {
        println!(
            "A {:<4}  A {:.2} ({:+.2})  B {:.2} ({:+.2})",
            scenario.outcome,
            scenario.predicted.new_rating_a,
            scenario.delta_a,
            scenario.predicted.new_rating_b,
            scenario.delta_b
        );
    }
}

fn run(args: &Args, config: &AppConfig) -> Result<()> {
    let calculator = EloRatingCalculator::new(config.rating)?;

    if args.scenarios {
        let (rating_a, rating_b) = ratings(args)?;
        let table = calculator.rating_scenarios(rating_a, rating_b)?;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&table)?);
        } else {
            print_scenarios(&table);
        }
        return Ok(());
    }

    let input = match_input(args)?;
    let expected = calculator.expected_scores(input.rating_a, input.rating_b);
    let result = calculator.evaluate(&input)?;
    let (delta_a, delta_b) = result.deltas(&input);

    let report = EvaluationReport {
        input,
        k_factor: calculator.k_factor(),
        expected_a: expected.expected_a,
        expected_b: expected.expected_b,
        result,
        delta_a,
        delta_b,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn main() {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    debug!(
        service = %config.service.name,
        k_factor = config.rating.k_factor,
        "Configuration loaded"
    );

    if args.dry_run {
        info!("Configuration validation successful");
        println!(
            "{}: K-factor {}, scores in [{}, {}]",
            config.service.name,
            config.rating.k_factor,
            config.rating.min_score,
            config.rating.max_score
        );
        return;
    }

    if let Err(e) = run(&args, &config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
