//! In-memory realtime store
//!
//! Stands in for the hosted realtime database with the same observable
//! behavior: validated writes keyed by session id, snapshot replay on
//! subscribe, live change notifications, and on-disconnect cleanup for
//! abruptly closed sessions. The roster treats it as a black box behind
//! [`FeedSource`].

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{DashMap, DashSet};
use tokio::sync::mpsc;
use tracing::{debug, info};

use hondana_core::{
    sanitize_nickname, validate_input, CheckInInput, Clock, FeedError, FeedEvent, KioskResult,
    VisitorId, VisitorProfile,
};
use hondana_history::{VisitLog, VisitRecord};

use crate::subscription::{FeedQuery, FeedResult, FeedSource, FeedSubscription};

struct Subscriber {
    query: FeedQuery,
    sender: mpsc::UnboundedSender<FeedEvent>,
}

/// In-memory feed store with realtime fan-out
pub struct MemoryFeed {
    records: DashMap<VisitorId, VisitorProfile>,
    /// Keys with server-side cleanup armed for abrupt disconnects
    armed_disconnect: DashSet<VisitorId>,
    subscribers: Mutex<Vec<Subscriber>>,
    history: Arc<VisitLog>,
    clock: Arc<dyn Clock>,
}

impl MemoryFeed {
    /// Create an empty feed store
    pub fn new(clock: Arc<dyn Clock>, history: Arc<VisitLog>) -> Self {
        Self {
            records: DashMap::new(),
            armed_disconnect: DashSet::new(),
            subscribers: Mutex::new(Vec::new()),
            history,
            clock,
        }
    }

    /// Check a visitor in (the kiosk form's submit)
    ///
    /// Validation happens here, at the write boundary; rejected input never
    /// reaches storage or any subscriber. A key that is already present is
    /// overwritten and surfaces to subscribers as a change, not a duplicate
    /// add. The join time is stamped server-side, and any cleanup armed by a
    /// previous session of this key is cancelled before the write.
    pub fn check_in(&self, key: VisitorId, input: CheckInInput) -> KioskResult<VisitorProfile> {
        validate_input(&input)?;

        let joined_at = self.clock.now_utc();
        let profile = VisitorProfile {
            nickname: sanitize_nickname(&input.nickname),
            color: input.color,
            role: input.role,
            mode: input.mode,
            joined_at: Some(joined_at),
        };

        self.armed_disconnect.remove(&key);
        let replaced = self.records.insert(key.clone(), profile.clone()).is_some();

        info!(%key, nickname = %profile.nickname, replaced, "visitor checked in");
        let event = if replaced {
            FeedEvent::changed(key.clone(), profile.clone())
        } else {
            FeedEvent::added(key.clone(), profile.clone())
        };
        self.publish(event, Some(joined_at));

        self.history
            .record(VisitRecord::new(
                key,
                profile.nickname.clone(),
                profile.color.clone(),
                profile.role.clone(),
                joined_at,
            ))
            .map_err(|err| FeedError::WriteFailed(err.to_string()))?;

        Ok(profile)
    }

    /// Replace a visitor's payload without re-checking in (mode switches)
    pub fn update_profile(&self, key: VisitorId, input: CheckInInput) -> KioskResult<VisitorProfile> {
        validate_input(&input)?;

        let Some(mut entry) = self.records.get_mut(&key) else {
            return Err(FeedError::WriteFailed(format!("no record for {key}")).into());
        };
        let joined_at = entry.joined_at;
        let profile = VisitorProfile {
            nickname: sanitize_nickname(&input.nickname),
            color: input.color,
            role: input.role,
            mode: input.mode,
            joined_at,
        };
        *entry = profile.clone();
        drop(entry);

        self.publish(FeedEvent::changed(key, profile.clone()), joined_at);
        Ok(profile)
    }

    /// Explicitly check a visitor out
    pub fn check_out(&self, key: &VisitorId) {
        self.armed_disconnect.remove(key);
        if let Some((key, profile)) = self.records.remove(key) {
            info!(%key, "visitor checked out");
            self.publish(FeedEvent::removed(key), profile.joined_at);
        }
    }

    /// Arm server-side cleanup for this key's session
    ///
    /// When [`Self::disconnect`] later fires for the key, its record is
    /// removed as if the visitor had checked out.
    pub fn arm_disconnect(&self, key: VisitorId) {
        self.armed_disconnect.insert(key);
    }

    /// Signal an abrupt session loss
    ///
    /// Removes the record only if cleanup was armed and not since cancelled
    /// by a fresh check-in.
    pub fn disconnect(&self, key: &VisitorId) {
        if self.armed_disconnect.remove(key).is_some() {
            if let Some((key, profile)) = self.records.remove(key) {
                info!(%key, "session dropped, record cleaned up");
                self.publish(FeedEvent::removed(key), profile.joined_at);
            }
        }
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Fan an event out to every subscriber whose range filter admits it
    ///
    /// `joined_at` is the record's join time, used for the range check;
    /// subscribers whose channel has closed are pruned here.
    fn publish(&self, event: FeedEvent, joined_at: Option<DateTime<Utc>>) {
        // a poisoned list is still a usable list
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.retain(|subscriber| {
            let in_range = match joined_at {
                Some(at) => at >= subscriber.query.joined_since,
                // records without a join time sort before any range start
                None => false,
            };
            if !in_range {
                return !subscriber.sender.is_closed();
            }
            if subscriber.sender.send(event.clone()).is_err() {
                debug!("dropping closed feed subscriber");
                return false;
            }
            true
        });
    }

    fn snapshot_for(&self, query: &FeedQuery) -> Vec<(VisitorId, VisitorProfile)> {
        let mut snapshot: Vec<(VisitorId, VisitorProfile)> = self
            .records
            .iter()
            .filter_map(|entry| {
                let joined_at = entry.value().joined_at?;
                (joined_at >= query.joined_since)
                    .then(|| (entry.key().clone(), entry.value().clone()))
            })
            .collect();

        snapshot.sort_by_key(|(_, profile)| profile.joined_at);
        if snapshot.len() > query.limit_to_last {
            let skip = snapshot.len() - query.limit_to_last;
            snapshot.drain(..skip);
        }
        snapshot
    }
}

#[async_trait]
impl FeedSource for MemoryFeed {
    async fn subscribe(&self, query: FeedQuery) -> FeedResult<FeedSubscription> {
        let (sender, receiver) = mpsc::unbounded_channel();

        // replay the current snapshot as added events before going live
        for (key, profile) in self.snapshot_for(&query) {
            let _ = sender.send(FeedEvent::added(key, profile));
        }

        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(Subscriber { query, sender });

        Ok(FeedSubscription::new(receiver))
    }
}
