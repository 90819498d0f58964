//! In-memory visit history storage
//!
//! Append-only and shared across tasks (the write path appends while the
//! dashboard reads), so access goes through a lock. For durable storage a
//! database-backed implementation would replace this.

use std::sync::RwLock;

use chrono::{DateTime, Duration, Utc};

use hondana_core::date_string;

use crate::error::{HistoryError, HistoryResult};
use crate::record::VisitRecord;

/// Append-only log of check-ins
#[derive(Debug, Default)]
pub struct VisitLog {
    records: RwLock<Vec<VisitRecord>>,
}

impl VisitLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record
    pub fn record(&self, record: VisitRecord) -> HistoryResult<()> {
        let mut records = self
            .records
            .write()
            .map_err(|_| HistoryError::Storage("failed to acquire write lock".to_string()))?;
        records.push(record);
        Ok(())
    }

    /// All records for one `YYYY-MM-DD` date
    pub fn by_date(&self, date: &str) -> HistoryResult<Vec<VisitRecord>> {
        let records = self
            .records
            .read()
            .map_err(|_| HistoryError::Storage("failed to acquire read lock".to_string()))?;
        Ok(records.iter().filter(|r| r.date == date).cloned().collect())
    }

    /// Records for the trailing `days` days, oldest date first, today last
    ///
    /// Every date is present in the result even when it has no records, so
    /// chart rendering gets a fixed-width series.
    pub fn last_days(
        &self,
        days: u32,
        today: DateTime<Utc>,
    ) -> HistoryResult<Vec<(String, Vec<VisitRecord>)>> {
        let records = self
            .records
            .read()
            .map_err(|_| HistoryError::Storage("failed to acquire read lock".to_string()))?;

        let mut series = Vec::with_capacity(days as usize);
        for back in (0..days).rev() {
            let date = date_string(today - Duration::days(back as i64));
            let day_records: Vec<_> = records.iter().filter(|r| r.date == date).cloned().collect();
            series.push((date, day_records));
        }
        Ok(series)
    }

    /// Total number of recorded visits
    pub fn len(&self) -> usize {
        self.records.read().map(|r| r.len()).unwrap_or(0)
    }

    /// Whether the log is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
