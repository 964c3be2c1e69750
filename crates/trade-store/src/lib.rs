//! # Trade Store
//!
//! Where the analytics get their trades from. The engine never filters or
//! fetches on its own; callers pull trades out of a `TradeStore`, optionally
//! narrowed to an `AnalyticsPeriod`, and hand them over.
//!
//! ## Architectural Principles
//!
//! - **Ingestion boundary:** Rows arrive as loosely-typed `TradeRecord`s and
//!   are validated into strict `Trade` values here, so downstream code can
//!   assume well-formed input.
//! - **Swappable backend:** `TradeStore` is a trait; `JsonTradeStore` reads a
//!   JSON journal file.
//!
//! ## Public API
//!
//! - `TradeStore`: the query interface (`all_trades`, `trades_in_period`).
//! - `JsonTradeStore`: the file-backed implementation.
//! - `AnalyticsPeriod` / `PeriodPreset`: reporting windows.
//! - `StoreError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod error;
pub mod period;
pub mod repository;

// Re-export the key components to create a clean, public-facing API.
pub use error::StoreError;
pub use period::{AnalyticsPeriod, PeriodPreset};
pub use repository::{JsonTradeStore, TradeStore};
