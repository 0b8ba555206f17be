//! SQLite schema definitions and SQL query constants.
//!
//! This module contains all SQL statements used by the SQLite store,
//! pure data, no I/O.

/// SQL statement to create the users table.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

pub const INSERT_USER: &str = r#"
INSERT INTO users (id, name, email, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, name, email, created_at, updated_at
FROM users
WHERE id = ?1
"#;

pub const SELECT_USERS: &str = r#"
SELECT id, name, email, created_at, updated_at
FROM users
ORDER BY id ASC
"#;

// created_at is absent from the SET list; RETURNING hands back the stored row.
pub const UPDATE_USER: &str = r#"
UPDATE users
SET name = ?2, email = ?3, updated_at = ?4
WHERE id = ?1
RETURNING id, name, email, created_at, updated_at
"#;

pub const DELETE_USER: &str = r#"
DELETE FROM users
WHERE id = ?1
"#;
