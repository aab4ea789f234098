//! Stats module - Five-number summaries

mod calculator;

pub use calculator::{FiveNumberSummary, GroupSummary, StatsCalculator};
