//! # Trading Journal Analytics
//!
//! Turns the trades a user has journaled into performance statistics.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** This crate knows nothing about storage or presentation. It
//!   depends only on `core-types`. Date-range filtering is the caller's job.
//! - **Total functions:** Every calculation accepts any list of trades,
//!   including an empty one, and returns a defined value. Ratios that would be
//!   infinite or undefined are reported as zero.
//!
//! ## Public API
//!
//! - `compute_analytics` / `AnalyticsEngine`: the period report (`AnalyticsBundle`).
//! - `DashboardSnapshot` / `DashboardStats`: the journal-wide dashboard figures.

pub mod breakdown;
pub mod dashboard;
pub mod engine;
mod math;
pub mod report;
pub mod series;

#[cfg(test)]
mod test_support;

// Re-export the key components to create a clean, public-facing API.
pub use breakdown::{GroupPerformance, NO_SETUP_LABEL};
pub use dashboard::{DEFAULT_RECENT_TRADES, DashboardSnapshot, DashboardStats, MarketShare};
pub use engine::{AnalyticsEngine, compute_analytics};
pub use report::{AnalyticsBundle, AnalyticsStats, CurrentStreak, RECENT_MONTHS, StreakKind};
pub use series::{DailyPnL, DayOfWeekPnL, EquityPoint, HourlyPnL, MonthlyPnL, YearMonth};
