//! Visit records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hondana_core::{date_string, AvatarColor, VisitorId, VisitorRole};

/// One check-in, as remembered for the dashboard
///
/// Written once at check-in time and never updated; mode changes during the
/// visit are a roster concern, not a history one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub visitor: VisitorId,
    pub nickname: String,
    pub color: AvatarColor,
    pub role: VisitorRole,
    pub checked_in_at: DateTime<Utc>,
    /// `YYYY-MM-DD` of `checked_in_at`, precomputed so date queries are a
    /// string compare
    pub date: String,
}

impl VisitRecord {
    /// Build a record, stamping the date from the check-in time
    pub fn new(
        visitor: VisitorId,
        nickname: impl Into<String>,
        color: AvatarColor,
        role: VisitorRole,
        checked_in_at: DateTime<Utc>,
    ) -> Self {
        Self {
            visitor,
            nickname: nickname.into(),
            color,
            role,
            date: date_string(checked_in_at),
            checked_in_at,
        }
    }
}
