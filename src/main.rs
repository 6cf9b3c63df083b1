//! GreenScore Tracker - Main entry point
//!
//! Terminal front end: account sign-up, login, and the usage dashboard
//! with the monthly green score and the interest rate it earns.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use greenscore_tracker_lib::core::{Config, DailyRecord, MonthlySummary};
use greenscore_tracker_lib::dashboard::{Dashboard, DashboardData, TrackerKind};
use greenscore_tracker_lib::db::CredentialStore;
use greenscore_tracker_lib::scoring::ScoreAggregator;
use greenscore_tracker_lib::session::Session;
use greenscore_tracker_lib::usage::{ReplaySource, SampleGenerator, UsageRecorder, UsageSource};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "greenscore-tracker", version, about = "Usage dashboard with green score and interest rate")]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Account database (overrides the configured path)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account
    Signup(Credentials),
    /// Log in and show the dashboard
    Dashboard(DashboardArgs),
    /// Score a JSON array of samples without logging in
    Score {
        /// JSON file with an array of usage samples
        #[arg(long)]
        samples: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct Credentials {
    #[arg(long)]
    username: String,
    #[arg(long)]
    password: String,
}

#[derive(Args)]
struct DashboardArgs {
    #[command(flatten)]
    credentials: Credentials,
    /// Open the monthly report for a tracker (electricity, transport, water, incentives)
    #[arg(long)]
    tracker: Option<TrackerKind>,
    /// Seed for the synthetic month
    #[arg(long)]
    seed: Option<u64>,
    /// Number of days to generate
    #[arg(long)]
    days: Option<u32>,
    /// Replay samples from a JSON file instead of generating them
    #[arg(long, conflicts_with = "seed")]
    samples: Option<PathBuf>,
    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ScoreOutput<'a> {
    days: &'a [DailyRecord],
    summary: MonthlySummary,
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    log::debug!("Starting GreenScore Tracker v{}", env!("CARGO_PKG_VERSION"));

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }),
    };

    match cli.command {
        Command::Signup(credentials) => {
            let store = open_store(&config, cli.db)?;
            store
                .create_account(&credentials.username, &credentials.password)
                .context("failed to create account")?;
            println!("You have successfully created an account!");
            println!("Run `greenscore-tracker dashboard` to log in.");
        }
        Command::Dashboard(args) => {
            let store = open_store(&config, cli.db)?;
            run_dashboard(&config, &store, args)?;
        }
        Command::Score { samples, json } => {
            let mut source = ReplaySource::from_json_file(&samples)
                .with_context(|| format!("failed to read samples from {}", samples.display()))?;
            let mut recorder = UsageRecorder::new(&config.scoring)?;
            let remaining = source.remaining();
            recorder.record_from(&mut source, remaining)?;

            let records = recorder.ledger_snapshot();
            let summary = ScoreAggregator::new(&config.interest).summarize(&records);
            if json {
                let output = ScoreOutput { days: &records, summary };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_days(&records);
                print_summary(&summary);
            }
        }
    }

    Ok(())
}

fn open_store(config: &Config, override_path: Option<PathBuf>) -> Result<CredentialStore> {
    let path = match override_path {
        Some(path) => path,
        None => config.storage.resolve_database_path()?,
    };
    CredentialStore::open(&path)
        .with_context(|| format!("failed to open credential store at {}", path.display()))
}

fn run_dashboard(config: &Config, store: &CredentialStore, args: DashboardArgs) -> Result<()> {
    let mut session = Session::new();
    if !session.login(store, &args.credentials.username, &args.credentials.password)? {
        bail!("Incorrect Username/Password");
    }

    let days = args.days.unwrap_or(config.general.days_in_month);
    let mut recorder = UsageRecorder::new(&config.scoring)?;

    let mut source: Box<dyn UsageSource> = match &args.samples {
        Some(path) => Box::new(
            ReplaySource::from_json_file(path)
                .with_context(|| format!("failed to read samples from {}", path.display()))?,
        ),
        None => {
            let generator = match args.seed.or(config.general.sample_seed) {
                Some(seed) => SampleGenerator::seeded(&config.scoring, seed)?,
                None => SampleGenerator::new(&config.scoring)?,
            };
            log::info!("Generating {} day(s) with seed {}", days, generator.seed());
            Box::new(generator)
        }
    };
    recorder.record_from(source.as_mut(), days as usize)?;

    if let Some(tracker) = args.tracker {
        session.select_tracker(tracker)?;
    }

    let aggregator = ScoreAggregator::new(&config.interest);
    let data = Dashboard::build(
        &session,
        &recorder,
        &aggregator,
        config.general.report_start_date()?,
        days,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&data)?);
    } else {
        print_dashboard(&data, source.is_synthetic());
    }

    log::debug!("Session lasted {:?}", session.started_at.elapsed());
    session.logout();
    Ok(())
}

fn print_dashboard(data: &DashboardData, synthetic: bool) {
    println!("Dashboard");
    println!("Welcome {}\n", data.username);

    for tracker in &data.trackers {
        println!(
            "  {:<12} Units Today: {:>4} | Units This Month: {:>5}",
            tracker.kind.name(),
            tracker.today,
            tracker.month
        );
    }
    println!();

    if synthetic {
        println!("  (usage below is synthetic demonstration data)");
    }
    print_summary(&data.summary);

    if let Some(report) = &data.report {
        println!("\nMonthly Report for {}", report.tracker);
        for entry in &report.entries {
            println!("  Date: {}, {} usage: {}", entry.date, report.tracker, entry.usage);
        }
    }
}

fn print_days(records: &[DailyRecord]) {
    println!("  Day | Electricity |   Water | Petrol | Score");
    for (i, record) in records.iter().enumerate() {
        println!(
            "  {:>3} | {:>11.2} | {:>7.2} | {:>6.2} | {:.4}",
            i + 1,
            record.sample.electricity_usage,
            record.sample.water_usage,
            record.sample.petrol_usage,
            record.green_score
        );
    }
}

fn print_summary(summary: &MonthlySummary) {
    println!("  Days recorded:  {}", summary.days_recorded);
    println!("  Green score:    {:.4}", summary.average_green_score);
    println!("  Interest rate:  {:.2}%", summary.interest_rate);
}
