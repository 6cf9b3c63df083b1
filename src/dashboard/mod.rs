//! Dashboard assembly
//!
//! Collects everything the presentation layer renders for a logged-in user:
//! the mock trackers, the monthly green score summary, and the report of the
//! selected tracker.

use crate::core::{MonthlySummary, Result};
use crate::scoring::ScoreAggregator;
use crate::session::Session;
use crate::usage::UsageRecorder;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Units added to a tracker report per day of the month
const REPORT_UNITS_PER_DAY: u32 = 10;

/// Trackers shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackerKind {
    Electricity,
    Transport,
    Water,
    Incentives,
}

impl TrackerKind {
    pub const ALL: [TrackerKind; 4] = [
        TrackerKind::Electricity,
        TrackerKind::Transport,
        TrackerKind::Water,
        TrackerKind::Incentives,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TrackerKind::Electricity => "Electricity",
            TrackerKind::Transport => "Transport",
            TrackerKind::Water => "Water",
            TrackerKind::Incentives => "Incentives",
        }
    }
}

impl fmt::Display for TrackerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TrackerKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown tracker '{}'", s))
    }
}

/// A tracker tile with today's and this month's units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    pub kind: TrackerKind,
    pub today: u32,
    pub month: u32,
}

/// The fixed tracker values displayed on every dashboard
pub fn default_trackers() -> Vec<Tracker> {
    vec![
        Tracker { kind: TrackerKind::Electricity, today: 50, month: 1500 },
        Tracker { kind: TrackerKind::Transport, today: 20, month: 600 },
        Tracker { kind: TrackerKind::Water, today: 100, month: 3000 },
        Tracker { kind: TrackerKind::Incentives, today: 10, month: 300 },
    ]
}

/// One line of a monthly tracker report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub date: NaiveDate,
    pub usage: u32,
}

/// Day-by-day report for a single tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub tracker: TrackerKind,
    pub entries: Vec<ReportEntry>,
}

impl MonthlyReport {
    /// Report starting at `start`; day N reports `N * 10` units
    pub fn build(tracker: TrackerKind, start: NaiveDate, days: u32) -> Self {
        let entries = start
            .iter_days()
            .zip(1..=days)
            .map(|(date, day)| ReportEntry {
                date,
                usage: day * REPORT_UNITS_PER_DAY,
            })
            .collect();

        Self { tracker, entries }
    }
}

/// Dashboard data returned to the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
    pub username: String,
    pub trackers: Vec<Tracker>,
    pub summary: MonthlySummary,
    /// Report for the selected tracker, if one is open
    pub report: Option<MonthlyReport>,
}

pub struct Dashboard;

impl Dashboard {
    /// Assemble the dashboard for a logged-in session.
    ///
    /// Recomputes the summary from the recorder's current ledger on every call.
    pub fn build(
        session: &Session,
        recorder: &UsageRecorder,
        aggregator: &ScoreAggregator,
        report_start: NaiveDate,
        report_days: u32,
    ) -> Result<DashboardData> {
        let username = session.require_login()?.to_string();
        let summary = aggregator.summarize(recorder.ledger().records());
        let report = session
            .selected_tracker()
            .map(|tracker| MonthlyReport::build(tracker, report_start, report_days));

        Ok(DashboardData {
            username,
            trackers: default_trackers(),
            summary,
            report,
        })
    }
}
