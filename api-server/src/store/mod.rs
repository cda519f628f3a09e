mod db;
mod legacy;

use std::{
    fs,
    path::Path,
    sync::{Mutex, MutexGuard},
};

use rusqlite::{params, Connection};

use crate::types::ScoreEntry;

pub(crate) const DB_FILE: &str = "leaderboard.db";

/// SQLite-backed, append-only score ledger.
///
/// One connection behind one mutex: every write, including the rank query
/// that follows an insert, runs inside a single transaction while the lock is
/// held, so concurrent submissions serialize instead of racing.
pub struct LeaderboardStore {
    conn: Mutex<Connection>,
}

impl LeaderboardStore {
    /// Open (or create) `leaderboard.db` under `data_dir`.
    ///
    /// When the table is empty and a legacy `leaderboard.json` sits next to
    /// it, its entries are imported once and the file is renamed so the
    /// import never repeats.
    pub fn open(data_dir: &Path) -> Result<Self, String> {
        fs::create_dir_all(data_dir)
            .map_err(|e| format!("failed to create data dir {}: {e}", data_dir.display()))?;

        let db_path = data_dir.join(DB_FILE);
        let conn = Connection::open(&db_path)
            .map_err(|e| format!("failed to open SQLite at {}: {e}", db_path.display()))?;

        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA busy_timeout=5000;
             PRAGMA synchronous=NORMAL;",
        )
        .map_err(|e| format!("failed to set pragmas: {e}"))?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS scores (
                seq             INTEGER PRIMARY KEY AUTOINCREMENT,
                id              TEXT NOT NULL UNIQUE,
                name            TEXT NOT NULL,
                company         TEXT,
                score           INTEGER NOT NULL CHECK (score >= 0),
                spaceship_type  INTEGER NOT NULL,
                theme_color     TEXT NOT NULL,
                created_at      TEXT NOT NULL
             );
             CREATE INDEX IF NOT EXISTS idx_scores_rank ON scores(score DESC, seq ASC);",
        )
        .map_err(|e| format!("failed to create schema: {e}"))?;

        let store = Self {
            conn: Mutex::new(conn),
        };

        let imported = store.import_legacy(data_dir)?;
        if imported > 0 {
            tracing::warn!(imported, "imported legacy leaderboard.json entries");
        }

        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, String> {
        self.conn
            .lock()
            .map_err(|_| "leaderboard connection mutex poisoned".to_string())
    }

    /// Appends `entry` and returns its 1-based rank in the full ordering.
    ///
    /// Ties rank by insertion order, so a new entry lands after every
    /// existing entry with the same score.
    pub(crate) fn submit(&self, entry: &ScoreEntry) -> Result<u64, String> {
        let mut conn = self.lock()?;
        let tx = conn
            .transaction()
            .map_err(|e| format!("begin submit failed: {e}"))?;

        Self::insert_row(&tx, entry)?;
        let seq = tx.last_insert_rowid();
        let rank: i64 = tx
            .query_row(
                "SELECT COUNT(*) FROM scores
                 WHERE score > ?1 OR (score = ?1 AND seq <= ?2)",
                params![db::to_sql_int(entry.score), seq],
                |row| row.get(0),
            )
            .map_err(|e| format!("rank query failed: {e}"))?;

        tx.commit()
            .map_err(|e| format!("commit submit failed: {e}"))?;
        Ok(rank as u64)
    }

    /// One page of the score-descending ordering. Offsets past the end yield
    /// an empty page.
    pub(crate) fn page(&self, offset: u64, limit: u64) -> Result<Vec<ScoreEntry>, String> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, name, company, score, spaceship_type, theme_color, created_at
                 FROM scores ORDER BY score DESC, seq ASC LIMIT ?1 OFFSET ?2",
            )
            .map_err(|e| format!("prepare page query failed: {e}"))?;
        let rows = stmt
            .query_map(
                params![db::to_sql_int(limit), db::to_sql_int(offset)],
                db::row_to_entry,
            )
            .map_err(|e| format!("page query failed: {e}"))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(|e| format!("failed to decode score row: {e}"))?);
        }
        Ok(entries)
    }

    pub(crate) fn count(&self) -> Result<u64, String> {
        let conn = self.lock()?;
        Self::count_rows(&conn)
    }

    fn count_rows(conn: &Connection) -> Result<u64, String> {
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM scores", [], |row| row.get(0))
            .map_err(|e| format!("count query failed: {e}"))?;
        Ok(count as u64)
    }
}
