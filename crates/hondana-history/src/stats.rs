//! Dashboard aggregations

use std::collections::BTreeMap;

use chrono::{DateTime, Timelike, Utc};

use hondana_core::date_string;

use crate::error::HistoryResult;
use crate::log::VisitLog;
use crate::record::VisitRecord;

/// How many recent visitors the dashboard lists
const RECENT_VISITORS_CAP: usize = 20;

/// Aggregated view for the admin dashboard
///
/// Hourly distribution, peak hour, role breakdown and the recent-visitor
/// list are computed over today's records; the daily series and week total
/// cover the trailing seven days.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub today_count: usize,
    pub week_total: usize,
    /// Check-ins per date, oldest first, today last
    pub daily_series: Vec<(String, usize)>,
    /// Today's check-ins per hour of day (UTC)
    pub hourly_counts: [usize; 24],
    /// Busiest hour today; `None` when nobody checked in yet
    pub peak_hour: Option<u32>,
    /// Today's check-ins per role label
    pub role_breakdown: BTreeMap<String, usize>,
    /// Today's visitors, most recent first, capped
    pub recent_visitors: Vec<VisitRecord>,
}

impl DashboardStats {
    /// Compute stats over the trailing week ending at `today`
    pub fn compute(log: &VisitLog, today: DateTime<Utc>) -> HistoryResult<Self> {
        let series = log.last_days(7, today)?;
        let today_str = date_string(today);

        let week_total = series.iter().map(|(_, records)| records.len()).sum();
        let daily_series = series
            .iter()
            .map(|(date, records)| (date.clone(), records.len()))
            .collect();

        let today_records: Vec<VisitRecord> = series
            .into_iter()
            .find(|(date, _)| *date == today_str)
            .map(|(_, records)| records)
            .unwrap_or_default();

        let mut hourly_counts = [0usize; 24];
        for record in &today_records {
            hourly_counts[record.checked_in_at.hour() as usize] += 1;
        }

        let peak_hour = if today_records.is_empty() {
            None
        } else {
            hourly_counts
                .iter()
                .enumerate()
                .max_by_key(|(_, count)| **count)
                .map(|(hour, _)| hour as u32)
        };

        let mut role_breakdown = BTreeMap::new();
        for record in &today_records {
            *role_breakdown
                .entry(record.role.as_str().to_string())
                .or_insert(0) += 1;
        }

        let mut recent_visitors = today_records.clone();
        recent_visitors.sort_by(|a, b| b.checked_in_at.cmp(&a.checked_in_at));
        recent_visitors.truncate(RECENT_VISITORS_CAP);

        Ok(Self {
            today_count: today_records.len(),
            week_total,
            daily_series,
            hourly_counts,
            peak_hour,
            role_breakdown,
            recent_visitors,
        })
    }
}
