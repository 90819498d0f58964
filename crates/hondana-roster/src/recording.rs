//! Recording sink for tests
//!
//! An in-memory [`PresentationSink`] that records every call it receives.
//! Shipped in the crate proper (not behind `cfg(test)`) so downstream crates
//! and the simulation can drive the adapter without a real surface.

use std::collections::HashSet;

use hondana_core::{SinkError, VisitorId, VisitorProfile};

use crate::sink::{PresentationSink, SinkResult};

/// One observed sink call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkCall {
    Create { key: VisitorId, handle: u64 },
    Update { handle: u64 },
    BeginExit { handle: u64 },
    Destroy { handle: u64 },
}

/// A presentation sink that renders nothing and remembers everything
///
/// Handles are numbered in creation order. Destroying a handle that is not
/// live is a silent no-op, mirroring the tolerance real surfaces need for
/// representations that already left the tree.
#[derive(Debug, Default)]
pub struct RecordingSink {
    next_handle: u64,
    calls: Vec<SinkCall>,
    live: HashSet<u64>,
    fail_next_creates: u32,
    fail_next_updates: u32,
}

impl RecordingSink {
    /// Create an empty recording sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything the sink has been asked to do, in order
    pub fn calls(&self) -> &[SinkCall] {
        &self.calls
    }

    /// Number of currently live representations
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Whether a handle is still live
    pub fn is_live(&self, handle: u64) -> bool {
        self.live.contains(&handle)
    }

    /// The most recent handle created for `key`, if any
    pub fn handle_for(&self, key: &VisitorId) -> Option<u64> {
        self.calls.iter().rev().find_map(|call| match call {
            SinkCall::Create { key: k, handle } if k == key => Some(*handle),
            _ => None,
        })
    }

    /// How many times `handle` was destroyed (0 or 1 for a correct driver)
    pub fn destroy_count(&self, handle: u64) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, SinkCall::Destroy { handle: h } if *h == handle))
            .count()
    }

    /// Make the next `n` create calls fail
    pub fn fail_next_creates(&mut self, n: u32) {
        self.fail_next_creates = n;
    }

    /// Make the next `n` update calls fail
    pub fn fail_next_updates(&mut self, n: u32) {
        self.fail_next_updates = n;
    }
}

impl PresentationSink for RecordingSink {
    type Handle = u64;

    fn create(&mut self, key: &VisitorId, _profile: &VisitorProfile) -> SinkResult<u64> {
        if self.fail_next_creates > 0 {
            self.fail_next_creates -= 1;
            return Err(SinkError::CreateFailed("injected create failure".to_string()));
        }

        let handle = self.next_handle;
        self.next_handle += 1;
        self.live.insert(handle);
        self.calls.push(SinkCall::Create {
            key: key.clone(),
            handle,
        });
        Ok(handle)
    }

    fn update(&mut self, handle: &mut u64, _profile: &VisitorProfile) -> SinkResult<()> {
        if self.fail_next_updates > 0 {
            self.fail_next_updates -= 1;
            return Err(SinkError::UpdateFailed("injected update failure".to_string()));
        }

        if !self.live.contains(handle) {
            // representation already gone; tolerated
            return Ok(());
        }
        self.calls.push(SinkCall::Update { handle: *handle });
        Ok(())
    }

    fn begin_exit(&mut self, handle: &mut u64) -> SinkResult<()> {
        if self.live.contains(handle) {
            self.calls.push(SinkCall::BeginExit { handle: *handle });
        }
        Ok(())
    }

    fn destroy(&mut self, handle: u64) -> SinkResult<()> {
        if self.live.remove(&handle) {
            self.calls.push(SinkCall::Destroy { handle });
        }
        Ok(())
    }
}
