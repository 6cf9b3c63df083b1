//! GreenScore Tracker - Demo CLI
//!
//! Walks the full pipeline: account creation, login, a seeded synthetic
//! month, daily green scores, and the resulting interest rate.

use greenscore_tracker_lib::core::{InterestConfig, ScoringConfig, UsageSample};
use greenscore_tracker_lib::dashboard::{Dashboard, TrackerKind};
use greenscore_tracker_lib::db::CredentialStore;
use greenscore_tracker_lib::scoring::ScoreAggregator;
use greenscore_tracker_lib::session::Session;
use greenscore_tracker_lib::usage::{SampleGenerator, UsageRecorder};

const DEMO_SEED: u64 = 2024;
const DEMO_DAYS: u32 = 30;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("==============================================");
    println!("   GreenScore Tracker - Demo CLI");
    println!("==============================================\n");

    // 1. Credential store
    println!("[1/4] Creating in-memory credential store...");
    let store = CredentialStore::open_in_memory()?;
    store.create_account("demo", "demo")?;
    println!("      Accounts: {}\n", store.account_count()?);

    // 2. Session
    println!("[2/4] Logging in...");
    let mut session = Session::new();
    if !session.login(&store, "demo", "wrong")? {
        println!("      Wrong password rejected");
    }
    session.login(&store, "demo", "demo")?;
    println!("      Logged in as {}\n", session.username().unwrap_or("?"));

    // 3. Generate and record a month
    println!("[3/4] Recording a synthetic month (seed {})...\n", DEMO_SEED);
    let norms = ScoringConfig::default();
    let mut generator = SampleGenerator::seeded(&norms, DEMO_SEED)?;
    let mut recorder = UsageRecorder::new(&norms)?;

    println!("----------------------------------------------");
    println!("  Day |  Elec  |  Water  | Petrol | Score");
    println!("----------------------------------------------");
    for (day, sample) in generator.generate_month(DEMO_DAYS).into_iter().enumerate() {
        let record = recorder.record_day(sample)?;
        println!(
            "  {:>3} | {:>6.2} | {:>7.2} | {:>6.2} | {:.4}",
            day + 1,
            sample.electricity_usage,
            sample.water_usage,
            sample.petrol_usage,
            record.green_score
        );
    }
    println!("----------------------------------------------\n");

    let rejected = recorder.record_day(UsageSample::new(-1.0, 0.0, 0.0));
    if let Err(e) = rejected {
        println!("  Rejected sample: {}", e);
        println!("  Ledger length unchanged: {}\n", recorder.ledger().len());
    }

    // 4. Summary
    println!("[4/4] Monthly summary...\n");
    let aggregator = ScoreAggregator::new(&InterestConfig::default());
    session.select_tracker(TrackerKind::Electricity)?;

    let start = chrono::NaiveDate::from_ymd_opt(2024, 7, 1)
        .ok_or_else(|| anyhow::anyhow!("invalid report start"))?;
    let data = Dashboard::build(&session, &recorder, &aggregator, start, 5)?;

    println!("=== Summary for {} ===\n", data.username);
    println!("  Days recorded:  {}", data.summary.days_recorded);
    println!("  Green score:    {:.4}", data.summary.average_green_score);
    println!("  Interest rate:  {:.2}%", data.summary.interest_rate);

    if let Some(report) = &data.report {
        println!("\n  First days of the {} report:", report.tracker);
        for entry in &report.entries {
            println!("    {}  {}", entry.date, entry.usage);
        }
    }

    session.logout();
    println!("\n==============================================\n");
    Ok(())
}
