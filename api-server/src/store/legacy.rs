use std::{collections::HashSet, fs, path::Path};

use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use super::*;
use crate::leaderboard::{now_rfc3339, sanitize};
use crate::types::SubmitScoreRequest;

pub(crate) const LEGACY_FILE: &str = "leaderboard.json";
pub(crate) const LEGACY_IMPORTED_SUFFIX: &str = ".imported";

/// `{ "scores": [...] }` as written by the previous file-backed service.
#[derive(Debug, Deserialize)]
struct LegacyBoard {
    #[serde(default)]
    scores: Vec<Value>,
}

impl LeaderboardStore {
    /// Returns how many entries were imported.
    pub(super) fn import_legacy(&self, data_dir: &Path) -> Result<usize, String> {
        let path = data_dir.join(LEGACY_FILE);
        if !path.is_file() {
            return Ok(0);
        }

        let mut conn = self.lock()?;
        if Self::count_rows(&conn)? > 0 {
            tracing::info!(
                path = %path.display(),
                "table already populated; leaving legacy file untouched"
            );
            return Ok(0);
        }

        let bytes = fs::read(&path)
            .map_err(|e| format!("failed to read legacy file {}: {e}", path.display()))?;
        let board: LegacyBoard = match serde_json::from_slice(&bytes) {
            Ok(board) => board,
            Err(e) => {
                tracing::warn!(path = %path.display(), "skipping unreadable legacy file: {e}");
                return Ok(0);
            }
        };

        let tx = conn
            .transaction()
            .map_err(|e| format!("begin legacy import failed: {e}"))?;
        let mut seen = HashSet::new();
        let mut imported = 0usize;
        for (index, raw) in board.scores.iter().enumerate() {
            let Some(entry) = legacy_entry(raw, &mut seen) else {
                tracing::warn!(index, "skipping invalid legacy entry");
                continue;
            };
            Self::insert_row(&tx, &entry)?;
            imported += 1;
        }
        tx.commit()
            .map_err(|e| format!("commit legacy import failed: {e}"))?;
        drop(conn);

        let mut done = path.clone().into_os_string();
        done.push(LEGACY_IMPORTED_SUFFIX);
        fs::rename(&path, &done)
            .map_err(|e| format!("failed to rename legacy file {}: {e}", path.display()))?;

        Ok(imported)
    }
}

/// Re-sanitizes one legacy record. Ids are kept unless missing or repeated,
/// timestamps unless missing.
fn legacy_entry(raw: &Value, seen: &mut HashSet<String>) -> Option<ScoreEntry> {
    let request: SubmitScoreRequest = serde_json::from_value(raw.clone()).ok()?;
    let clean = sanitize(&request).ok()?;

    let id = match raw.get("id") {
        Some(Value::String(id)) if !id.is_empty() => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => Uuid::now_v7().to_string(),
    };
    let id = if seen.contains(&id) {
        Uuid::now_v7().to_string()
    } else {
        id
    };
    seen.insert(id.clone());

    let created_at = raw
        .get("createdAt")
        .and_then(Value::as_str)
        .filter(|stamp| !stamp.is_empty())
        .map_or_else(now_rfc3339, str::to_string);

    Some(clean.into_entry(id, created_at))
}
