//! Error types for the Hondana kiosk

use thiserror::Error;

/// Top-level error type for kiosk operations
#[derive(Debug, Error)]
pub enum KioskError {
    #[error("Feed error: {0}")]
    Feed(#[from] FeedError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),
}

/// Errors related to the streaming feed source
///
/// These are non-fatal: the roster is left in its last-known state and the
/// feed source's own reconnect behavior is relied on for recovery.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Subscription closed")]
    SubscriptionClosed,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),
}

/// Errors raised at the write boundary, before anything is stored
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Nickname is empty")]
    EmptyNickname,

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid mode: {0}")]
    InvalidMode(String),
}

/// Errors raised by a presentation sink during create/update/destroy
///
/// Caught at the render-adapter boundary; roster state is already committed
/// by the time a sink runs and is never rolled back.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Create failed: {0}")]
    CreateFailed(String),

    #[error("Update failed: {0}")]
    UpdateFailed(String),

    #[error("Destroy failed: {0}")]
    DestroyFailed(String),
}

/// Result type alias for kiosk operations
pub type KioskResult<T> = Result<T, KioskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_error_display() {
        assert!(format!("{}", FeedError::SubscriptionClosed).contains("closed"));

        let err = FeedError::PermissionDenied("users node".to_string());
        assert!(format!("{}", err).contains("users node"));

        let err = FeedError::WriteFailed("offline".to_string());
        assert!(format!("{}", err).contains("offline"));
    }

    #[test]
    fn test_validation_error_display() {
        assert!(format!("{}", ValidationError::EmptyNickname).contains("empty"));

        let err = ValidationError::InvalidColor("magenta".to_string());
        assert!(format!("{}", err).contains("magenta"));

        let err = ValidationError::InvalidRole("pirate".to_string());
        assert!(format!("{}", err).contains("pirate"));

        let err = ValidationError::InvalidMode("napping".to_string());
        assert!(format!("{}", err).contains("napping"));
    }

    #[test]
    fn test_sink_error_display() {
        let err = SinkError::CreateFailed("grid full".to_string());
        assert!(format!("{}", err).contains("Create failed"));
        assert!(format!("{}", err).contains("grid full"));
    }

    #[test]
    fn test_error_conversions() {
        let feed_err = FeedError::SubscriptionClosed;
        let kiosk_err: KioskError = feed_err.into();
        assert!(matches!(kiosk_err, KioskError::Feed(_)));

        let validation_err = ValidationError::EmptyNickname;
        let kiosk_err: KioskError = validation_err.into();
        assert!(matches!(kiosk_err, KioskError::Validation(_)));

        let sink_err = SinkError::DestroyFailed("gone".to_string());
        let kiosk_err: KioskError = sink_err.into();
        assert!(matches!(kiosk_err, KioskError::Sink(_)));
    }
}
