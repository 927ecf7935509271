//! V001: evidence model tables.
//! artifact_types, attribute_types, artifacts, attributes.

pub const MIGRATION_SQL: &str = r#"
-- Registered evidence categories. The name is the registration key.
CREATE TABLE IF NOT EXISTS artifact_types (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    display_name TEXT NOT NULL
) STRICT;

-- Registered attribute kinds.
CREATE TABLE IF NOT EXISTS attribute_types (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    display_name TEXT NOT NULL,
    value_type TEXT NOT NULL
) STRICT;

-- One row per evidence record, attached to a data-source file.
CREATE TABLE IF NOT EXISTS artifacts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    artifact_type_id INTEGER NOT NULL REFERENCES artifact_types(id),
    source_file_id INTEGER NOT NULL,
    source_file_name TEXT NOT NULL,
    source_file_path TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_artifacts_type ON artifacts(artifact_type_id);
CREATE INDEX IF NOT EXISTS idx_artifacts_source ON artifacts(source_file_id);

-- Attribute values. `ordinal` keeps insertion order within an artifact.
CREATE TABLE IF NOT EXISTS attributes (
    artifact_id INTEGER NOT NULL REFERENCES artifacts(id) ON DELETE CASCADE,
    attribute_type_id INTEGER NOT NULL REFERENCES attribute_types(id),
    ordinal INTEGER NOT NULL,
    source TEXT NOT NULL,
    value TEXT NOT NULL,
    PRIMARY KEY (artifact_id, ordinal)
) STRICT;
"#;
