use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/leaderboard`. `score` and `spaceshipType` stay untyped
/// here; the sanitizer decides what counts as numeric.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitScoreRequest {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) company: Option<String>,
    #[serde(default)]
    pub(crate) score: Option<Value>,
    #[serde(default)]
    pub(crate) spaceship_type: Option<Value>,
    #[serde(default)]
    pub(crate) theme_color: Option<String>,
}

/// Raw `page` / `limit` query values; parsed leniently by the pagination code.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct LeaderboardQuery {
    #[serde(default)]
    pub(crate) page: Option<String>,
    #[serde(default)]
    pub(crate) limit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ScoreEntry {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) company: Option<String>,
    pub(crate) score: u64,
    pub(crate) spaceship_type: i64,
    pub(crate) theme_color: String,
    pub(crate) created_at: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SubmitScoreResponse {
    pub(crate) message: &'static str,
    pub(crate) score: ScoreEntry,
    pub(crate) rank: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LeaderboardPage {
    pub(crate) scores: Vec<ScoreEntry>,
    pub(crate) current_page: u64,
    pub(crate) total_pages: u64,
    pub(crate) total_scores: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
    pub(crate) service: &'static str,
    pub(crate) timestamp: String,
}
