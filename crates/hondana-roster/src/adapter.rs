//! Render adapter: feed events → roster mutations → sink calls
//!
//! Per event the order is fixed: the roster is mutated first, then the sink
//! is driven. A sink failure is logged and swallowed — the roster is the
//! source of truth and is never rolled back for a rendering problem.

use std::time::Duration;

use tracing::{debug, warn};

use hondana_core::{FeedEvent, VisitorId, VisitorProfile, EXIT_HOLD, MAX_AVATARS};

use crate::sink::PresentationSink;
use crate::store::{Roster, UpsertOutcome};

/// Roster bounds and timings, fixed at build time
#[derive(Debug, Clone, Copy)]
pub struct RosterConfig {
    /// Hard cap on simultaneously rendered entries
    pub max_entries: usize,
    /// How long an explicit removal's exit effect may play before the
    /// representation is destroyed
    pub exit_hold: Duration,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            max_entries: MAX_AVATARS,
            exit_hold: EXIT_HOLD,
        }
    }
}

/// A removal whose representation is still playing its exit effect
///
/// The entry is already gone from the roster; this owns the orphaned handle
/// until the caller's timer elapses and it is passed to
/// [`RenderAdapter::finish_exit`]. Because the handle is owned by value, a
/// re-check-in for the same key (which mints a fresh handle) can never be
/// touched by this pending exit — abandonment is safe by construction.
#[derive(Debug)]
pub struct PendingExit<H> {
    pub key: VisitorId,
    /// How long to hold before finishing
    pub hold: Duration,
    handle: H,
}

/// Bridges feed events to the roster store and the presentation sink
///
/// Per-key lifecycle is `absent → present → absent`, re-enterable: a visitor
/// can leave and check in again any number of times. Events for different
/// keys may interleave arbitrarily; each event is processed to completion
/// before the next.
pub struct RenderAdapter<S: PresentationSink> {
    roster: Roster<S::Handle>,
    sink: S,
    config: RosterConfig,
}

impl<S: PresentationSink> RenderAdapter<S> {
    /// Create an adapter over an empty roster
    pub fn new(config: RosterConfig, sink: S) -> Self {
        Self {
            roster: Roster::new(),
            sink,
            config,
        }
    }

    /// Apply one feed event
    ///
    /// Returns a [`PendingExit`] when an explicit removal left a
    /// representation behind to play its exit effect; the caller schedules
    /// [`Self::finish_exit`] after `hold`. Everything else is handled
    /// synchronously, including capacity evictions (which skip the exit
    /// effect to stay responsive).
    pub fn apply(&mut self, event: FeedEvent) -> Option<PendingExit<S::Handle>> {
        match event {
            FeedEvent::Added { key, profile } | FeedEvent::Changed { key, profile } => {
                self.upsert(key, profile);
                None
            }
            FeedEvent::Removed { key } => self.remove(&key),
        }
    }

    fn upsert(&mut self, key: VisitorId, profile: VisitorProfile) {
        match self.roster.upsert(key.clone(), profile.clone()) {
            UpsertOutcome::Created => {
                match self.sink.create(&key, &profile) {
                    Ok(handle) => {
                        self.roster.attach_handle(&key, handle);
                    }
                    Err(err) => {
                        warn!(%key, %err, "sink create failed; entry kept without representation");
                    }
                }

                for evicted in self.roster.evict_over_capacity(self.config.max_entries) {
                    debug!(key = %evicted.key, "evicting oldest entry over capacity");
                    if let Some(handle) = evicted.handle {
                        // capacity evictions skip the exit effect
                        if let Err(err) = self.sink.destroy(handle) {
                            warn!(key = %evicted.key, %err, "sink destroy failed during eviction");
                        }
                    }
                }
            }
            UpsertOutcome::Updated => {
                if let Some(entry) = self.roster.entry_mut(&key) {
                    match entry.handle.as_mut() {
                        Some(handle) => {
                            if let Err(err) = self.sink.update(handle, &profile) {
                                warn!(%key, %err, "sink update failed");
                            }
                        }
                        None => {
                            // the earlier create failed; render best-effort now
                            match self.sink.create(&key, &profile) {
                                Ok(handle) => entry.handle = Some(handle),
                                Err(err) => debug!(%key, %err, "sink create retry failed"),
                            }
                        }
                    }
                }
            }
        }
    }

    fn remove(&mut self, key: &VisitorId) -> Option<PendingExit<S::Handle>> {
        // Logical removal is immediate; only the representation lingers.
        let entry = self.roster.remove(key)?;
        let mut handle = entry.handle?;

        if let Err(err) = self.sink.begin_exit(&mut handle) {
            warn!(%key, %err, "sink exit effect failed");
        }
        Some(PendingExit {
            key: key.clone(),
            hold: self.config.exit_hold,
            handle,
        })
    }

    /// Finish a removal after its exit hold elapsed
    ///
    /// Destroys exactly the handle the exit was scheduled with. The roster
    /// is not consulted: if the key checked back in meanwhile, its fresh
    /// entry and handle are unaffected.
    pub fn finish_exit(&mut self, exit: PendingExit<S::Handle>) {
        if let Err(err) = self.sink.destroy(exit.handle) {
            warn!(key = %exit.key, %err, "sink destroy failed after exit hold");
        }
    }

    /// Re-render every live entry (stay-time refresh tick)
    pub fn refresh_all(&mut self) {
        for entry in self.roster.iter_in_order_mut() {
            if let Some(handle) = entry.handle.as_mut() {
                if let Err(err) = self.sink.update(handle, &entry.profile) {
                    warn!(key = %entry.key, %err, "sink update failed during refresh");
                }
            }
        }
    }

    /// Number of visible entries
    pub fn len(&self) -> usize {
        self.roster.len()
    }

    /// Whether the roster is empty
    pub fn is_empty(&self) -> bool {
        self.roster.is_empty()
    }

    /// Whether the roster is at (or somehow beyond) its capacity bound
    pub fn at_capacity(&self) -> bool {
        self.roster.len() >= self.config.max_entries
    }

    /// Keys in insertion order
    pub fn keys_in_order(&self) -> Vec<VisitorId> {
        self.roster.keys_in_order()
    }

    /// Read-only view of the roster
    pub fn roster(&self) -> &Roster<S::Handle> {
        &self.roster
    }

    /// Read-only view of the sink
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{RecordingSink, SinkCall};

    fn adapter(max: usize) -> RenderAdapter<RecordingSink> {
        RenderAdapter::new(
            RosterConfig {
                max_entries: max,
                ..RosterConfig::default()
            },
            RecordingSink::new(),
        )
    }

    fn key(s: &str) -> VisitorId {
        VisitorId::new(s)
    }

    fn profile(nickname: &str) -> VisitorProfile {
        VisitorProfile {
            nickname: nickname.to_string(),
            ..VisitorProfile::default()
        }
    }

    #[test]
    fn test_added_creates_representation() {
        let mut adapter = adapter(10);
        adapter.apply(FeedEvent::added(key("a"), profile("a")));

        assert_eq!(adapter.len(), 1);
        assert_eq!(adapter.sink().live_count(), 1);
        assert!(matches!(
            adapter.sink().calls()[0],
            SinkCall::Create { .. }
        ));
    }

    #[test]
    fn test_duplicate_added_is_an_update() {
        let mut adapter = adapter(10);
        adapter.apply(FeedEvent::added(key("a"), profile("first")));
        adapter.apply(FeedEvent::added(key("a"), profile("second")));

        assert_eq!(adapter.len(), 1);
        assert_eq!(adapter.sink().live_count(), 1);
        assert_eq!(
            adapter.roster().get(&key("a")).unwrap().profile.nickname,
            "second"
        );
        // one create, then an update — never a second create
        let creates = adapter
            .sink()
            .calls()
            .iter()
            .filter(|c| matches!(c, SinkCall::Create { .. }))
            .count();
        assert_eq!(creates, 1);
    }

    #[test]
    fn test_removed_unknown_key_is_noop() {
        let mut adapter = adapter(10);
        let pending = adapter.apply(FeedEvent::removed(key("ghost")));

        assert!(pending.is_none());
        assert!(adapter.sink().calls().is_empty());
    }

    #[test]
    fn test_create_failure_keeps_roster_entry() {
        let mut adapter = adapter(10);
        adapter.sink.fail_next_creates(1);

        adapter.apply(FeedEvent::added(key("a"), profile("a")));
        assert_eq!(adapter.len(), 1);
        assert!(adapter.roster().get(&key("a")).unwrap().handle.is_none());

        // a later change retries the render
        adapter.apply(FeedEvent::changed(key("a"), profile("a2")));
        assert!(adapter.roster().get(&key("a")).unwrap().handle.is_some());
        assert_eq!(adapter.sink().live_count(), 1);
    }

    #[test]
    fn test_update_failure_still_replaces_profile() {
        let mut adapter = adapter(10);
        adapter.apply(FeedEvent::added(key("a"), profile("first")));
        adapter.sink.fail_next_updates(1);

        adapter.apply(FeedEvent::changed(key("a"), profile("second")));
        assert_eq!(
            adapter.roster().get(&key("a")).unwrap().profile.nickname,
            "second"
        );
    }

    #[test]
    fn test_refresh_touches_every_live_entry() {
        let mut adapter = adapter(10);
        adapter.apply(FeedEvent::added(key("a"), profile("a")));
        adapter.apply(FeedEvent::added(key("b"), profile("b")));

        adapter.refresh_all();
        let updates = adapter
            .sink()
            .calls()
            .iter()
            .filter(|c| matches!(c, SinkCall::Update { .. }))
            .count();
        assert_eq!(updates, 2);
    }
}
