pub(crate) const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS periods (
    key         TEXT PRIMARY KEY NOT NULL,
    comment     TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS period_items (
    period_key  TEXT NOT NULL REFERENCES periods(key) ON DELETE CASCADE,
    kind        TEXT NOT NULL CHECK (kind IN ('income', 'expense')),
    position    INTEGER NOT NULL,
    category    TEXT NOT NULL,
    amount      INTEGER NOT NULL,
    PRIMARY KEY (period_key, kind, position)
);

CREATE INDEX IF NOT EXISTS idx_period_items_key ON period_items(period_key);
"#;

pub(crate) const CURRENT_VERSION: i32 = 1;

/// Migrations from version N to N+1.
/// Each entry is (from_version, sql).
pub(crate) const MIGRATIONS: &[(i32, &str)] = &[];
