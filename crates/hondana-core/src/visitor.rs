//! Visitor identity and display data
//!
//! The vocabularies here (colors, roles, modes) are closed on the write path
//! and open on the read path: an unknown label deserializes to `Other` and is
//! displayed as its raw string rather than rejected, because the feed is
//! assumed to have validated data when it was written.

use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Maximum nickname length after trimming
pub const NICKNAME_MAX: usize = 20;

/// Opaque unique identifier for one checked-in visitor
///
/// Stable for the duration of one visit. A visitor who leaves and returns
/// may check in again under the same id.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Serialize, Deserialize,
)]
#[display("{_0}")]
pub struct VisitorId(String);

impl VisitorId {
    /// Wrap an existing session id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Mint a fresh session id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for VisitorId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Avatar color choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AvatarColor {
    Blue,
    Red,
    Green,
    Yellow,
    Purple,
    Orange,
    /// Unknown label from the feed, displayed as-is
    Other(String),
}

impl AvatarColor {
    /// The wire label for this color
    pub fn as_str(&self) -> &str {
        match self {
            Self::Blue => "blue",
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Other(raw) => raw,
        }
    }

    /// Whether this is one of the accepted write-path values
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for AvatarColor {
    fn default() -> Self {
        Self::Blue
    }
}

impl From<String> for AvatarColor {
    fn from(s: String) -> Self {
        match s.as_str() {
            "blue" => Self::Blue,
            "red" => Self::Red,
            "green" => Self::Green,
            "yellow" => Self::Yellow,
            "purple" => Self::Purple,
            "orange" => Self::Orange,
            _ => Self::Other(s),
        }
    }
}

impl From<AvatarColor> for String {
    fn from(color: AvatarColor) -> Self {
        color.as_str().to_string()
    }
}

impl std::fmt::Display for AvatarColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Self-described visitor role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VisitorRole {
    Freelance,
    Student,
    Designer,
    Engineer,
    Writer,
    /// Unknown label from the feed, displayed as-is
    Other(String),
}

impl VisitorRole {
    /// The wire label for this role
    pub fn as_str(&self) -> &str {
        match self {
            Self::Freelance => "freelance",
            Self::Student => "student",
            Self::Designer => "designer",
            Self::Engineer => "engineer",
            Self::Writer => "writer",
            Self::Other(raw) => raw,
        }
    }

    /// Whether this is one of the accepted write-path values
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for VisitorRole {
    fn default() -> Self {
        Self::Freelance
    }
}

impl From<String> for VisitorRole {
    fn from(s: String) -> Self {
        match s.as_str() {
            "freelance" => Self::Freelance,
            "student" => Self::Student,
            "designer" => Self::Designer,
            "engineer" => Self::Engineer,
            "writer" => Self::Writer,
            _ => Self::Other(s),
        }
    }
}

impl From<VisitorRole> for String {
    fn from(role: VisitorRole) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for VisitorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the visitor is currently doing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PresenceMode {
    Work,
    Break,
    Meeting,
    /// Unknown label from the feed, displayed as-is
    Other(String),
}

impl PresenceMode {
    /// The wire label for this mode
    pub fn as_str(&self) -> &str {
        match self {
            Self::Work => "work",
            Self::Break => "break",
            Self::Meeting => "meeting",
            Self::Other(raw) => raw,
        }
    }

    /// Human-readable label shown next to the avatar
    ///
    /// Unknown modes fall back to their raw wire label.
    pub fn label(&self) -> &str {
        match self {
            Self::Work => "working",
            Self::Break => "on a break",
            Self::Meeting => "in a meeting",
            Self::Other(raw) => raw,
        }
    }

    /// Whether this is one of the accepted write-path values
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for PresenceMode {
    fn default() -> Self {
        Self::Work
    }
}

impl From<String> for PresenceMode {
    fn from(s: String) -> Self {
        match s.as_str() {
            "work" => Self::Work,
            "break" => Self::Break,
            "meeting" => Self::Meeting,
            _ => Self::Other(s),
        }
    }
}

impl From<PresenceMode> for String {
    fn from(mode: PresenceMode) -> Self {
        mode.as_str().to_string()
    }
}

impl std::fmt::Display for PresenceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The replaceable display payload for one visitor
///
/// Every field is defaulted so a sparse or partially-written feed record
/// still renders. `joined_at` is the domain-level join time shown to users
/// (stay time); arrival order on the screen is tracked separately by the
/// roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitorProfile {
    #[serde(default = "default_nickname")]
    pub nickname: String,
    #[serde(default)]
    pub color: AvatarColor,
    #[serde(default)]
    pub role: VisitorRole,
    #[serde(default)]
    pub mode: PresenceMode,
    /// Server-stamped join time; absent in malformed records
    #[serde(default)]
    pub joined_at: Option<DateTime<Utc>>,
}

fn default_nickname() -> String {
    "Guest".to_string()
}

impl Default for VisitorProfile {
    fn default() -> Self {
        Self {
            nickname: default_nickname(),
            color: AvatarColor::default(),
            role: VisitorRole::default(),
            mode: PresenceMode::default(),
            joined_at: None,
        }
    }
}

/// A check-in submission from the kiosk form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInInput {
    pub nickname: String,
    pub color: AvatarColor,
    pub role: VisitorRole,
    pub mode: PresenceMode,
}

/// Trim a nickname and cap it to [`NICKNAME_MAX`] characters
pub fn sanitize_nickname(raw: &str) -> String {
    raw.trim().chars().take(NICKNAME_MAX).collect()
}

/// Validate a check-in submission at the write boundary
///
/// Rejected input never reaches the feed or the roster. The read path does
/// not re-validate; it defaults instead.
pub fn validate_input(input: &CheckInInput) -> Result<(), ValidationError> {
    if sanitize_nickname(&input.nickname).is_empty() {
        return Err(ValidationError::EmptyNickname);
    }
    if let AvatarColor::Other(raw) = &input.color {
        return Err(ValidationError::InvalidColor(raw.clone()));
    }
    if let VisitorRole::Other(raw) = &input.role {
        return Err(ValidationError::InvalidRole(raw.clone()));
    }
    if let PresenceMode::Other(raw) = &input.mode {
        return Err(ValidationError::InvalidMode(raw.clone()));
    }
    Ok(())
}
