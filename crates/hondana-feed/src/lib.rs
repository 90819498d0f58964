//! # Hondana Feed
//!
//! The streaming data source the roster consumes, and the write path the
//! kiosk submits through.
//!
//! The real deployment sits on a hosted realtime database; this crate
//! defines the subscription contract ([`FeedSource`], [`FeedQuery`],
//! [`FeedSubscription`]) and ships [`MemoryFeed`], an in-memory store with
//! the same observable semantics: snapshot replay on subscribe, live
//! add/change/remove events, write-boundary validation, and server-side
//! on-disconnect cleanup. [`CommentFeed`] carries the ambient chat overlay
//! and [`Catalog`] the staff-curated event/book carousels.

pub mod catalog;
pub mod comments;
pub mod memory;
pub mod subscription;

pub use catalog::{
    BookDraft, BookEntry, BookPatch, Catalog, CatalogId, EventDraft, EventEntry, EventPatch,
};
pub use comments::{Comment, CommentFeed, COMMENT_MAX};
pub use memory::MemoryFeed;
pub use subscription::{FeedQuery, FeedResult, FeedSource, FeedSubscription};
