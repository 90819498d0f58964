//! Build-time constants
//!
//! The kiosk has no config files and no CLI; these are fixed at build time.

use std::time::Duration;

/// Hard cap on simultaneously rendered avatars
///
/// Purely a rendering-cost bound. Eviction past it is a display-only
/// truncation of the oldest visitors, not a statement about their validity.
pub const MAX_AVATARS: usize = 50;

/// How long an explicitly removed avatar's exit effect is allowed to play
/// before its representation is finally destroyed
pub const EXIT_HOLD: Duration = Duration::from_millis(400);

/// How often stay-time labels are refreshed
pub const STAY_REFRESH: Duration = Duration::from_secs(30);

/// Wall-clock tick for the screen header
pub const CLOCK_TICK: Duration = Duration::from_secs(1);

/// Server-side result cap on the feed subscription
pub const FEED_RESULT_CAP: usize = 100;
