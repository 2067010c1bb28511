//! nextset - next-session workout suggestions from an exercise log

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use nextset::config::EngineConfig;
use nextset::engine::suggest_workout;
use nextset::history::History;
use nextset::tui::App;

#[derive(Parser)]
#[command(name = "nextset")]
#[command(author, version, about = "Suggest the next workout from a FitNotes CSV log")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    suggest: SuggestArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the suggested workout in a terminal dashboard
    Tui {
        #[command(flatten)]
        suggest: SuggestArgs,
    },

    /// List the exercise library
    Catalog {
        /// JSON engine config
        #[arg(short, long, env = "NEXTSET_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Clone)]
struct SuggestArgs {
    /// Exercise log CSV (FitNotes export)
    log: Option<PathBuf>,

    /// JSON engine config
    #[arg(short, long, env = "NEXTSET_CONFIG")]
    config: Option<PathBuf>,

    /// Reference date, YYYY-MM-DD (default: today)
    #[arg(short, long)]
    today: Option<NaiveDate>,

    /// Recency window in days
    #[arg(long, env = "NEXTSET_WINDOW_DAYS")]
    window_days: Option<i64>,

    /// Number of focus groups
    #[arg(long, env = "NEXTSET_FOCUS_COUNT")]
    focus_count: Option<usize>,

    /// Multiplier applied to the last load
    #[arg(long, env = "NEXTSET_PROGRESSION")]
    progression: Option<f64>,

    /// Bar weight added to bilateral lifts
    #[arg(long, env = "NEXTSET_BAR_WEIGHT")]
    bar_weight: Option<f64>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path),
        None => Ok(EngineConfig::default()),
    }
}

impl SuggestArgs {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = load_config(self.config.as_ref())?;
        if let Some(days) = self.window_days {
            config.window_days = days;
        }
        if let Some(count) = self.focus_count {
            config.focus_count = count;
        }
        if let Some(factor) = self.progression {
            config.progression_factor = factor;
        }
        if let Some(weight) = self.bar_weight {
            config.bar_weight = weight;
        }
        Ok(config)
    }

    fn plan(&self) -> Result<nextset::WorkoutPlan> {
        let log = self
            .log
            .as_ref()
            .context("No exercise log given (usage: nextset <LOG.csv>)")?;
        let config = self.engine_config()?;
        let history = History::open(log)?;
        let today = self.today.unwrap_or_else(|| Local::now().date_naive());

        let report = history.report();
        info!(
            rows = report.rows_read,
            kept = history.len(),
            invalid_dates = report.invalid_dates,
            malformed = report.malformed_skipped,
            weights_defaulted = report.weights_defaulted,
            "Normalized log"
        );

        Ok(suggest_workout(history.entries(), today, &config))
    }
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Tui { suggest }) => {
            let plan = suggest.plan()?;
            let mut app = App::new(plan);
            app.run()?;
        }

        Some(Commands::Catalog { config }) => {
            let config = load_config(config.as_ref())?;
            for entry in config.catalog.entries() {
                println!("{}", entry.group);
                for exercise in &entry.exercises {
                    println!("  - {}", exercise);
                }
            }
        }

        None => {
            let plan = cli.suggest.plan()?;
            if cli.suggest.json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                println!("{}", plan.format_report());
            }
        }
    }

    Ok(())
}
