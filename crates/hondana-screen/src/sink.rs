//! Log-backed presentation sink
//!
//! The production surface is a DOM/SVG renderer; that whole layer is
//! presentational and lives elsewhere. This sink gives the runtime a real
//! [`PresentationSink`] to drive, rendering each lifecycle step as a
//! structured log event instead of pixels.

use std::sync::Arc;

use tracing::{debug, info};

use hondana_core::{format_stay, Clock, VisitorId, VisitorProfile};
use hondana_roster::{PresentationSink, SinkResult};

/// Handle to one logged representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogHandle {
    key: VisitorId,
    slot: u64,
}

impl LogHandle {
    /// The display slot this representation occupies
    pub fn slot(&self) -> u64 {
        self.slot
    }
}

/// A presentation sink that renders to the log
pub struct LogSink {
    clock: Arc<dyn Clock>,
    next_slot: u64,
}

impl LogSink {
    /// Create a sink
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            next_slot: 0,
        }
    }

    fn stay_label(&self, profile: &VisitorProfile) -> String {
        profile
            .joined_at
            .map(|joined| format_stay(joined, self.clock.now_utc()))
            .unwrap_or_default()
    }
}

impl PresentationSink for LogSink {
    type Handle = LogHandle;

    fn create(&mut self, key: &VisitorId, profile: &VisitorProfile) -> SinkResult<LogHandle> {
        let slot = self.next_slot;
        self.next_slot += 1;

        info!(
            %key,
            slot,
            nickname = %profile.nickname,
            color = %profile.color,
            mode = profile.mode.label(),
            "avatar enters"
        );
        Ok(LogHandle {
            key: key.clone(),
            slot,
        })
    }

    fn update(&mut self, handle: &mut LogHandle, profile: &VisitorProfile) -> SinkResult<()> {
        debug!(
            key = %handle.key,
            slot = handle.slot,
            nickname = %profile.nickname,
            mode = profile.mode.label(),
            stay = %self.stay_label(profile),
            "avatar refreshed"
        );
        Ok(())
    }

    fn begin_exit(&mut self, handle: &mut LogHandle) -> SinkResult<()> {
        debug!(key = %handle.key, slot = handle.slot, "avatar exit effect");
        Ok(())
    }

    fn destroy(&mut self, handle: LogHandle) -> SinkResult<()> {
        info!(key = %handle.key, slot = handle.slot, "avatar leaves");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hondana_core::SystemClock;

    #[test]
    fn test_slots_are_assigned_in_order() {
        let mut sink = LogSink::new(Arc::new(SystemClock));
        let profile = VisitorProfile::default();

        let first = sink.create(&VisitorId::new("a"), &profile).unwrap();
        let second = sink.create(&VisitorId::new("b"), &profile).unwrap();
        assert_eq!(first.slot(), 0);
        assert_eq!(second.slot(), 1);
    }
}
