//! Daybook CLI
//!
//! Command-line interface for the check-in journal:
//! - Run pattern detection over the recorded history
//! - List active patterns
//! - Print the weekly review
//! - Inspect a single day

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Datelike, Duration, Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use daybook::config::{generate_default_config, Config};
use daybook::journal::CheckIn;
use daybook::patterns::PatternEngine;
use daybook::store::{JournalStore, JsonJournalStore, JsonPatternStore};

#[derive(Parser)]
#[command(name = "daybook")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Personal check-in journal with behavioral pattern detection")]
#[command(
    long_about = "Daybook records structured morning and evening check-ins and\nscans the accumulated history for recurring behavioral patterns."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data directory (overrides config and DAYBOOK_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text", global = true)]
    format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run pattern detection over the recorded history
    Detect,

    /// List active patterns
    Patterns,

    /// Print the weekly review
    Review {
        /// First day of the week to review (default: this week's Monday)
        #[arg(long)]
        week_of: Option<NaiveDate>,
    },

    /// Print one day's check-in
    Show {
        /// Date to inspect (YYYY-MM-DD)
        date: NaiveDate,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load_default();
    if let Some(data_dir) = &cli.data_dir {
        config.data.data_dir = data_dir.to_string_lossy().to_string();
    }

    init_logging(&config);

    match cli.command {
        Commands::Detect => {
            let engine = open_engine(&config)?;
            let patterns = engine
                .run_detection()
                .await
                .context("detection run failed")?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&patterns)?);
            } else if patterns.is_empty() {
                println!("No patterns detected. Keep checking in - a week of data is needed.");
            } else {
                println!("Detected {} pattern(s):\n", patterns.len());
                for pattern in &patterns {
                    println!("  [{}] {}", pattern.kind(), pattern.title);
                    println!("      {}", pattern.description);
                }
            }
        }

        Commands::Patterns => {
            let engine = open_engine(&config)?;
            let patterns = engine.active_patterns().await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&patterns)?);
            } else if patterns.is_empty() {
                println!("No active patterns.");
            } else {
                println!("{:<16} {:<12} {}", "Kind", "Detected", "Title");
                println!("{}", "-".repeat(60));
                for pattern in &patterns {
                    println!(
                        "{:<16} {:<12} {}",
                        pattern.kind().to_string(),
                        pattern.detected_at.format("%Y-%m-%d"),
                        pattern.title
                    );
                }
            }
        }

        Commands::Review { week_of } => {
            let week_start = week_of.unwrap_or_else(|| {
                let today = Local::now().date_naive();
                today - Duration::days(i64::from(today.weekday().num_days_from_monday()))
            });

            let engine = open_engine(&config)?;
            let summary = engine.weekly_review(week_start).await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", summary.render());
            }
        }

        Commands::Show { date } => {
            let journal = JsonJournalStore::new(config.data.data_dir())?;
            match journal.get_check_in(date).await? {
                Some(check_in) if cli.format == "json" => {
                    println!("{}", serde_json::to_string_pretty(&check_in)?);
                }
                Some(check_in) => print_check_in(&check_in),
                None => println!("No check-in recorded for {}.", date),
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &content)?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("daybook={}", config.logging.level)),
    );

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn open_engine(config: &Config) -> anyhow::Result<PatternEngine> {
    let data_dir = config.data.data_dir();
    let journal = Arc::new(
        JsonJournalStore::new(&data_dir)
            .with_context(|| format!("cannot open journal store in {:?}", data_dir))?,
    );
    let patterns = Arc::new(
        JsonPatternStore::new(&data_dir)
            .with_context(|| format!("cannot open pattern store in {:?}", data_dir))?,
    );
    Ok(PatternEngine::new(journal, patterns))
}

fn print_check_in(check_in: &CheckIn) {
    println!("Check-in for {}", check_in.date);

    match &check_in.morning {
        Some(morning) => {
            println!("\nMorning:");
            println!("  Energy: {}/10", morning.energy_level);
            println!("  Capacity: {}/10", morning.capacity_feeling);
            if let Some(goal) = &morning.must_do_today {
                println!("  Must do: {}", goal);
            }
            if let Some(sleep) = &morning.sleep {
                println!(
                    "  Sleep: {}/10 quality, {:.1}h{}",
                    sleep.quality,
                    sleep.hours_slept,
                    if sleep.restless { ", restless" } else { "" }
                );
            }
            if let Some(state) = &morning.emotional_state {
                println!("  Mood: {}/10", state.overall_mood);
            }
        }
        None => println!("\nMorning: (skipped)"),
    }

    match &check_in.evening {
        Some(evening) => {
            println!("\nEvening:");
            println!("  Energy: {}/10", evening.energy_level);
            if let Some(completed) = evening.must_do_completed {
                println!("  Must-do completed: {}", if completed { "yes" } else { "no" });
            }
            if let Some(overcommitted) = evening.overcommitted {
                println!("  Overcommitted: {}", if overcommitted { "yes" } else { "no" });
            }
            for mistake in &evening.mistakes {
                println!("  Mistake: {}", mistake.category);
            }
            if let Some(notes) = &evening.notes {
                println!("  Notes: {}", notes);
            }
        }
        None => println!("\nEvening: (skipped)"),
    }
}
