//! Submission sanitizing and pagination math; no I/O.

use std::time::SystemTime;

use serde_json::Value;
use uuid::Uuid;

use crate::config::PageLimits;
use crate::error::LeaderboardError;
use crate::types::{LeaderboardQuery, ScoreEntry, SubmitScoreRequest};

pub(crate) const MAX_TEXT_LEN: usize = 30;
pub(crate) const DEFAULT_THEME_COLOR: &str = "#00ff00";
pub(crate) const SUBMIT_SUCCESS_MESSAGE: &str = "Score submitted successfully";
/// Largest integer a JSON (f64) client reads back exactly; also fits SQLite's i64.
pub(crate) const MAX_SCORE: u64 = (1 << 53) - 1;

/// A submission that passed validation, waiting for an id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SanitizedScore {
    pub(crate) name: String,
    pub(crate) company: Option<String>,
    pub(crate) score: u64,
    pub(crate) spaceship_type: i64,
    pub(crate) theme_color: String,
}

impl SanitizedScore {
    pub(crate) fn into_entry(self, id: String, created_at: String) -> ScoreEntry {
        ScoreEntry {
            id,
            name: self.name,
            company: self.company,
            score: self.score,
            spaceship_type: self.spaceship_type,
            theme_color: self.theme_color,
            created_at,
        }
    }

    /// Stamps a fresh time-ordered id and the current time.
    pub(crate) fn into_new_entry(self) -> ScoreEntry {
        self.into_entry(Uuid::now_v7().to_string(), now_rfc3339())
    }
}

pub(crate) fn sanitize(req: &SubmitScoreRequest) -> Result<SanitizedScore, LeaderboardError> {
    let name = req
        .name
        .as_deref()
        .map(clip)
        .filter(|name| !name.is_empty());
    let score = req.score.as_ref().and_then(numeric);

    let (Some(name), Some(score)) = (name, score) else {
        return Err(LeaderboardError::validation(
            "Name and score are required",
            "invalid_submission",
        ));
    };

    Ok(SanitizedScore {
        name,
        company: req
            .company
            .as_deref()
            .map(clip)
            .filter(|company| !company.is_empty()),
        score: score.floor().clamp(0.0, MAX_SCORE as f64) as u64,
        spaceship_type: req
            .spaceship_type
            .as_ref()
            .and_then(numeric)
            .map_or(0, |value| value.floor() as i64),
        theme_color: req
            .theme_color
            .as_deref()
            .filter(|color| !color.is_empty())
            .map_or_else(|| DEFAULT_THEME_COLOR.to_string(), truncate),
    })
}

/// Trims, then keeps at most [`MAX_TEXT_LEN`] characters.
fn clip(raw: &str) -> String {
    truncate(raw.trim())
}

fn truncate(raw: &str) -> String {
    raw.chars().take(MAX_TEXT_LEN).collect()
}

fn numeric(value: &Value) -> Option<f64> {
    value.as_f64().filter(|v| v.is_finite())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageRequest {
    /// 1-based.
    pub(crate) page: u64,
    pub(crate) limit: u64,
}

impl PageRequest {
    pub(crate) fn from_query(query: &LeaderboardQuery, limits: PageLimits) -> Self {
        let page = query.page.as_deref().and_then(parse_lenient).unwrap_or(1);
        let limit = query
            .limit
            .as_deref()
            .and_then(parse_lenient)
            .unwrap_or(limits.default_size)
            .min(limits.max_size);
        Self { page, limit }
    }

    pub(crate) fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

pub(crate) fn total_pages(total: u64, limit: u64) -> u64 {
    if limit == 0 {
        return 0;
    }
    total.div_ceil(limit)
}

/// Leading-digits parse in the spirit of `parseInt`: `"3abc"` is 3. Zero,
/// negatives and garbage yield `None`.
fn parse_lenient(raw: &str) -> Option<u64> {
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse::<u64>().ok().filter(|value| *value > 0)
}

pub(crate) fn now_rfc3339() -> String {
    humantime::format_rfc3339_millis(SystemTime::now()).to_string()
}
