//! Feed events
//!
//! The sole input to the roster core: an ordered stream of add/change/remove
//! events for visitor records. Delivery order is guaranteed per key only;
//! events for different keys interleave arbitrarily.

use serde::{Deserialize, Serialize};

use crate::visitor::{VisitorId, VisitorProfile};

/// Events streamed by a feed source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FeedEvent {
    /// A record appeared under the subscribed collection
    Added {
        key: VisitorId,
        profile: VisitorProfile,
    },

    /// An existing record's payload was replaced
    Changed {
        key: VisitorId,
        profile: VisitorProfile,
    },

    /// A record was deleted
    Removed { key: VisitorId },
}

impl FeedEvent {
    /// Create an added event
    pub fn added(key: VisitorId, profile: VisitorProfile) -> Self {
        Self::Added { key, profile }
    }

    /// Create a changed event
    pub fn changed(key: VisitorId, profile: VisitorProfile) -> Self {
        Self::Changed { key, profile }
    }

    /// Create a removed event
    pub fn removed(key: VisitorId) -> Self {
        Self::Removed { key }
    }

    /// The key this event is about
    pub fn key(&self) -> &VisitorId {
        match self {
            Self::Added { key, .. } => key,
            Self::Changed { key, .. } => key,
            Self::Removed { key } => key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_key() {
        let key = VisitorId::new("u1");
        let profile = VisitorProfile::default();

        assert_eq!(FeedEvent::added(key.clone(), profile.clone()).key(), &key);
        assert_eq!(FeedEvent::changed(key.clone(), profile).key(), &key);
        assert_eq!(FeedEvent::removed(key.clone()).key(), &key);
    }
}
