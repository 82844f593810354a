//! API request/response DTOs

use serde::{Deserialize, Serialize};

use crate::data::{AudienceInsights, Plan, Trend, TrendFilter};

/// Trend listing response: the filtered view plus the criteria that
/// produced it.
#[derive(Debug, Serialize)]
pub struct TrendsResponse {
    pub trends: Vec<Trend>,
    pub filter: TrendFilter,
}

/// Bookmark toggle response
#[derive(Debug, Serialize)]
pub struct BookmarkResponse {
    pub trend_id: String,
    pub bookmarked: bool,
}

/// Bookmark listing response
#[derive(Debug, Serialize)]
pub struct BookmarksResponse {
    pub ids: Vec<String>,
    /// Bookmarked trends still present in the loaded collection
    pub trends: Vec<Trend>,
}

/// Content generation request
///
/// Either `trend_id` (resolved against the loaded collection) or a
/// free-form `topic` must be provided.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub platform: String,
    pub content_type: String,
    #[serde(default)]
    pub trend_id: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}

/// Profile analysis submission
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub platform: String,
    pub url: String,
    pub niche: String,
    pub confidence: f64,
    pub brand_voice: Vec<String>,
    pub audience_insights: AudienceInsights,
    pub content_themes: Vec<String>,
}

/// Settings/onboarding patch; absent fields are left unchanged.
/// An empty-string niche clears the stored value.
#[derive(Debug, Deserialize)]
pub struct AccountPatch {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub plan: Option<Plan>,
    #[serde(default)]
    pub niche: Option<String>,
    #[serde(default)]
    pub platforms: Option<Vec<String>>,
    #[serde(default)]
    pub onboarding_complete: Option<bool>,
}
