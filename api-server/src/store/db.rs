use rusqlite::{params, Connection, Row};

use super::*;

impl LeaderboardStore {
    pub(super) fn insert_row(conn: &Connection, entry: &ScoreEntry) -> Result<(), String> {
        conn.execute(
            "INSERT INTO scores (
                id, name, company, score, spaceship_type, theme_color, created_at
            ) VALUES (?1,?2,?3,?4,?5,?6,?7)",
            params![
                entry.id,
                entry.name,
                entry.company.as_deref(),
                to_sql_int(entry.score),
                entry.spaceship_type,
                entry.theme_color,
                entry.created_at,
            ],
        )
        .map_err(|e| format!("insert score failed: {e}"))?;
        Ok(())
    }
}

pub(super) fn row_to_entry(row: &Row<'_>) -> rusqlite::Result<ScoreEntry> {
    let score: i64 = row.get(3)?;
    Ok(ScoreEntry {
        id: row.get(0)?,
        name: row.get(1)?,
        company: row.get(2)?,
        score: score.max(0) as u64,
        spaceship_type: row.get(4)?,
        theme_color: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// SQLite integers are signed; larger values are pinned to `i64::MAX`.
pub(super) fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
