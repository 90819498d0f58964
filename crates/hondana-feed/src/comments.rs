//! Ambient comment overlay feed
//!
//! Short messages that drift across the shared screen. Read-only with
//! respect to the roster; subscribers just receive whatever is sent after
//! they subscribed.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use hondana_core::{AvatarColor, Clock, VisitorId};

/// Maximum comment length after trimming
pub const COMMENT_MAX: usize = 50;

/// One overlay comment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub key: VisitorId,
    pub nickname: String,
    pub text: String,
    pub color: AvatarColor,
    pub sent_at: DateTime<Utc>,
}

/// Fan-out channel for overlay comments
pub struct CommentFeed {
    subscribers: Mutex<Vec<mpsc::UnboundedSender<Comment>>>,
    clock: Arc<dyn Clock>,
}

impl CommentFeed {
    /// Create an empty comment feed
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// Subscribe to comments sent from now on
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<Comment> {
        let (sender, receiver) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(sender);
        receiver
    }

    /// Send a comment
    ///
    /// The text is trimmed and capped to [`COMMENT_MAX`] characters; a
    /// comment that is empty after trimming is dropped silently and `None`
    /// is returned.
    pub fn send(
        &self,
        key: VisitorId,
        nickname: impl Into<String>,
        color: AvatarColor,
        text: &str,
    ) -> Option<Comment> {
        let trimmed: String = text.trim().chars().take(COMMENT_MAX).collect();
        if trimmed.is_empty() {
            return None;
        }

        let comment = Comment {
            key,
            nickname: nickname.into(),
            text: trimmed,
            color,
            sent_at: self.clock.now_utc(),
        };

        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscribers.retain(|sender| sender.send(comment.clone()).is_ok());

        Some(comment)
    }
}
