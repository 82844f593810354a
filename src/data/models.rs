//! Data models
//!
//! Rust structs representing users, trends, generated content, and
//! notifications. All models use ULID for IDs and chrono for timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// ID Types
// =============================================================================

/// Entity ID wrapper (ULID format, 26 characters)
///
/// Example: "01ARZ3NDEKTSV4RRFFQ69G5FAV"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    /// Generate a new ULID
    pub fn new() -> Self {
        Self(ulid::Ulid::new().to_string())
    }

    /// Create from existing string
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// User identity
// =============================================================================

/// Subscription plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Free,
    Starter,
    Pro,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Starter => "starter",
            Self::Pro => "pro",
        }
    }

    /// Parse from the stored column value. Unknown values fall back to Free.
    pub fn from_str_or_free(s: &str) -> Self {
        match s {
            "starter" => Self::Starter,
            "pro" => Self::Pro,
            _ => Self::Free,
        }
    }
}

/// A registered user
///
/// The password hash lives only in the users table and is never
/// carried on this struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: String,
    /// Stored as entered; compared case-insensitively
    pub email: String,
    pub display_name: String,
    pub plan: Plan,
    /// Free-text content category, e.g. "Health & Fitness"
    pub niche: Option<String>,
    /// Platform identifiers the user publishes to
    pub platforms: Vec<String>,
    pub onboarding_complete: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Trends
// =============================================================================

/// Trend momentum phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Momentum {
    Rising,
    Peak,
    Declining,
}

impl Momentum {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rising => "Rising",
            Self::Peak => "Peak",
            Self::Declining => "Declining",
        }
    }
}

/// A trending topic
///
/// Immutable once loaded into the state store; sourced externally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trend {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// 0-100
    pub viral_score: u8,
    pub momentum: Momentum,
    /// Display string, e.g. "2 hours ago"
    pub time_ago: String,
    pub keywords: Vec<String>,
    pub why_trending: String,
    pub related_trends: Vec<String>,
    pub region: String,
}

/// Filter criteria applied to the trend collection
///
/// "All" and the empty search string are neutral values that skip
/// their respective narrowing step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendFilter {
    pub category: String,
    pub momentum: String,
    pub search: String,
}

impl TrendFilter {
    pub const ALL: &'static str = "All";

    /// Neutral filter: matches every trend
    pub fn neutral() -> Self {
        Self {
            category: Self::ALL.to_string(),
            momentum: Self::ALL.to_string(),
            search: String::new(),
        }
    }
}

impl Default for TrendFilter {
    fn default() -> Self {
        Self::neutral()
    }
}

// =============================================================================
// Generated content
// =============================================================================

/// Sparse bag of generated content fields
///
/// Which fields are populated depends on platform and content type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outline: Option<String>,
}

/// One generated content entry in the history
///
/// Read-only after creation; the history is ordered newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedContent {
    pub id: String,
    /// None for free-form topics not tied to a trend
    pub trend_id: Option<String>,
    pub platform: String,
    pub content_type: String,
    pub content: ContentBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_reach: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement_prediction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub viral_score: Option<u8>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// User analysis
// =============================================================================

/// Audience insight block of a profile analysis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudienceInsights {
    pub demographics: String,
    pub interests: Vec<String>,
}

/// One profile analysis result, appended to the per-user history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAnalysis {
    pub id: String,
    pub platform: String,
    pub url: String,
    pub niche: String,
    /// 0.0-1.0
    pub confidence: f64,
    pub brand_voice: Vec<String>,
    pub audience_insights: AudienceInsights,
    pub content_themes: Vec<String>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Notifications
// =============================================================================

/// Notification severity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
}

/// A transient user-facing notification
///
/// Lives in the state store's ordered queue until it expires or is
/// dismissed. IDs are monotonic per store, collision-free within a
/// session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub message: String,
}
