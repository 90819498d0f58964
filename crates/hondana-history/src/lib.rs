//! # Hondana History
//!
//! Append-only visit history and the aggregations behind the admin
//! dashboard: daily totals, hourly distribution, peak hour, role breakdown.
//!
//! Every successful check-in appends a [`VisitRecord`] to the shared
//! [`VisitLog`]; the live roster is deliberately not consulted here — the
//! dashboard reads history, the screen reads the roster.

pub mod error;
pub mod log;
pub mod record;
pub mod stats;

pub use error::{HistoryError, HistoryResult};
pub use log::VisitLog;
pub use record::VisitRecord;
pub use stats::DashboardStats;
