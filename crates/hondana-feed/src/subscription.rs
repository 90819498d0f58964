//! Feed subscription contract
//!
//! A subscription is scoped by a server-side range filter ("joined at or
//! after the start of today") and a result cap, and delivers three kinds of
//! callbacks — added, changed, removed — as [`FeedEvent`]s on a channel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use hondana_core::{today_start, FeedError, FeedEvent, FEED_RESULT_CAP};

/// Result type alias for feed operations
pub type FeedResult<T> = Result<T, FeedError>;

/// Server-side scoping for a subscription
#[derive(Debug, Clone, Copy)]
pub struct FeedQuery {
    /// Only records whose join time is at or after this instant
    pub joined_since: DateTime<Utc>,
    /// At most this many records in the initial snapshot, most recent kept
    pub limit_to_last: usize,
}

impl FeedQuery {
    /// The screen's standard query: today's records, capped
    pub fn today(now: DateTime<Utc>) -> Self {
        Self {
            joined_since: today_start(now),
            limit_to_last: FEED_RESULT_CAP,
        }
    }
}

/// A live feed subscription
///
/// The current snapshot is replayed as `Added` events before live events
/// begin, so a fresh subscriber rebuilds the full picture from one stream —
/// a page reload needs nothing else.
pub struct FeedSubscription {
    receiver: mpsc::UnboundedReceiver<FeedEvent>,
}

impl FeedSubscription {
    pub(crate) fn new(receiver: mpsc::UnboundedReceiver<FeedEvent>) -> Self {
        Self { receiver }
    }

    /// Wait for the next event; `None` when the feed dropped this subscriber
    pub async fn next_event(&mut self) -> Option<FeedEvent> {
        self.receiver.recv().await
    }

    /// Non-blocking poll, for drains in tests
    pub fn try_next_event(&mut self) -> Option<FeedEvent> {
        self.receiver.try_recv().ok()
    }
}

/// A streaming source of visitor records
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Open a subscription scoped by `query`
    async fn subscribe(&self, query: FeedQuery) -> FeedResult<FeedSubscription>;
}
