//! # Hondana Screen
//!
//! The shared-screen runtime: one task that subscribes to the visitor feed,
//! drives the roster engine, completes exit effects, refreshes stay-time
//! labels, ticks the wall clock, and surfaces overlay comments.
//!
//! Everything that mutates the roster lives on this one task — other
//! components only read the [`ScreenStats`] view it exposes.

pub mod logging;
pub mod screen;
pub mod sink;
pub mod stats;

pub use screen::{ScreenConfig, ScreenContext};
pub use sink::{LogHandle, LogSink};
pub use stats::ScreenStats;
