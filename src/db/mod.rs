mod schema;

use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::error::StoreError;
use crate::models::{EntryKind, LineItems, PeriodRecord};

type Result<T> = std::result::Result<T, StoreError>;

/// Key-value store of period records, one SQLite file per user.
pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        tracing::debug!(path = %path.display(), "record store opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    // ── Periods ───────────────────────────────────────────────

    /// Store a period, replacing whatever was stored under `key` before.
    pub(crate) fn insert_period(
        &mut self,
        key: &str,
        incomes: &LineItems,
        expenses: &LineItems,
        comment: &str,
    ) -> Result<()> {
        let now = chrono::Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO periods (key, comment, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)
             ON CONFLICT(key) DO UPDATE SET comment = excluded.comment, updated_at = excluded.updated_at",
            params![key, comment, now],
        )?;
        tx.execute(
            "DELETE FROM period_items WHERE period_key = ?1",
            params![key],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO period_items (period_key, kind, position, category, amount)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (kind, items) in [(EntryKind::Income, incomes), (EntryKind::Expense, expenses)] {
                for (position, (category, amount)) in items.iter().enumerate() {
                    let amount = i64::try_from(amount)
                        .map_err(|_| StoreError::corrupt(key, format!("{category} amount {amount} out of range")))?;
                    stmt.execute(params![key, kind_str(kind), position as i64, category, amount])?;
                }
            }
        }
        tx.commit()?;
        tracing::info!(key, incomes = incomes.len(), expenses = expenses.len(), "period saved");
        Ok(())
    }

    pub(crate) fn insert_record(&mut self, record: &PeriodRecord) -> Result<()> {
        self.insert_period(
            &record.key,
            &record.incomes,
            &record.expenses,
            &record.comment,
        )
    }

    /// Every stored key, in the order each key was first written.
    pub(crate) fn fetch_all_period_keys(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT key FROM periods ORDER BY rowid")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<std::result::Result<Vec<String>, _>>()?)
    }

    /// Exact-key lookup. `Ok(None)` when nothing was stored under `key`.
    pub(crate) fn fetch_period(&self, key: &str) -> Result<Option<PeriodRecord>> {
        let comment: Option<String> = self
            .conn
            .query_row(
                "SELECT comment FROM periods WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        let Some(comment) = comment else {
            tracing::debug!(key, "period not found");
            return Ok(None);
        };

        let mut incomes = LineItems::new();
        let mut expenses = LineItems::new();
        let mut stmt = self.conn.prepare(
            "SELECT kind, category, amount FROM period_items
             WHERE period_key = ?1 ORDER BY kind DESC, position",
        )?;
        let rows = stmt.query_map(params![key], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, i64>(2)?,
            ))
        })?;
        for row in rows {
            let (kind, category, amount) = row?;
            let amount = u64::try_from(amount).map_err(|_| {
                StoreError::corrupt(key, format!("negative amount {amount} for {category}"))
            })?;
            match kind.as_str() {
                "income" => incomes.set(&category, amount),
                "expense" => expenses.set(&category, amount),
                other => {
                    return Err(StoreError::corrupt(key, format!("unknown item kind '{other}'")))
                }
            }
        }

        Ok(Some(PeriodRecord::new(
            key.to_string(),
            incomes,
            expenses,
            comment,
        )))
    }

    pub(crate) fn period_exists(&self, key: &str) -> Result<bool> {
        Ok(self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM periods WHERE key = ?1)",
            params![key],
            |row| row.get(0),
        )?)
    }
}

fn kind_str(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Income => "income",
        EntryKind::Expense => "expense",
    }
}
