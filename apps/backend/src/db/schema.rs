//! SQLite schema definitions.

/// Key-value table holding one serialized collection per user.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS card_collections (
    user_key TEXT PRIMARY KEY,
    cards_json TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;
