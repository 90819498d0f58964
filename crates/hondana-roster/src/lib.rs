//! # Hondana Roster
//!
//! The bounded live-roster engine: an in-memory, insertion-ordered view of
//! "who is checked in right now", synchronized with a streaming
//! add/change/remove feed under a hard capacity limit, and mirrored into a
//! presentation surface.
//!
//! ## Pieces
//!
//! - [`Roster`]: ordered key→entry store; iteration order is insertion order,
//!   which is load-bearing because it defines eviction order
//! - [`Roster::evict_over_capacity`]: the capacity enforcer, oldest-first
//! - [`PresentationSink`]: the seam to whatever renders entries
//! - [`RenderAdapter`]: bridges feed events to store mutations and sink calls
//!   in a fixed, deterministic order per event
//! - [`RecordingSink`]: a shipped test double that records every sink call
//!
//! ## Guarantees
//!
//! - Keys are unique; a second "added" for a live key is an update
//! - The store never exceeds its capacity after a mutation returns
//! - Eviction removes from the front of insertion order, one at a time
//! - A removed entry's presentation handle is destroyed at most once
//!   (`destroy` takes the handle by value)
//! - The store is mutated before any sink call and never rolled back on sink
//!   failure; rendering is best-effort, the roster is the source of truth

pub mod adapter;
pub mod recording;
pub mod sink;
pub mod store;

pub use adapter::{PendingExit, RenderAdapter, RosterConfig};
pub use recording::{RecordingSink, SinkCall};
pub use sink::{PresentationSink, SinkResult};
pub use store::{Roster, RosterEntry, UpsertOutcome};
