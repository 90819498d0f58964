//! # Hondana Core
//!
//! Core types, errors, and helpers shared across the Hondana kiosk stack.
//!
//! This crate provides the vocabulary the rest of the workspace speaks:
//!
//! - [`VisitorId`]: opaque key for one checked-in visitor
//! - [`VisitorProfile`]: the replaceable display payload (nickname, color,
//!   role, mode, join time), tolerant of missing fields on the read path
//! - [`FeedEvent`]: add/change/remove events streamed by a feed source
//! - [`Clock`]: time abstraction so stay-time logic is testable
//! - Error enums ([`FeedError`], [`ValidationError`], [`SinkError`]) under a
//!   single [`KioskError`] umbrella

pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod time;
pub mod visitor;

// Re-export main types
pub use clock::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use time::*;
pub use visitor::*;
