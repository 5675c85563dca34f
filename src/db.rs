use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

pub async fn init_db(database_url: &str) -> SqlitePool {
    let options = SqliteConnectOptions::from_str(database_url)
        .expect("Invalid DATABASE_URL")
        .create_if_missing(true);

    SqlitePoolOptions::new()
        .connect_with(options)
        .await
        .expect("Failed to connect to database")
}

/// Statements are individually idempotent, so the bootstrap can run on
/// every startup. The two unique indexes are the source of truth for
/// duplicate rejection: concurrent writers race on the index, not on an
/// application-level read-then-write.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS employees (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id TEXT NOT NULL,
        full_name   TEXT NOT NULL,
        email       TEXT NOT NULL,
        department  TEXT NOT NULL,
        created_at  TEXT NOT NULL
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_employees_employee_id
        ON employees (employee_id)",
    "CREATE INDEX IF NOT EXISTS idx_employees_email ON employees (email)",
    "CREATE TABLE IF NOT EXISTS attendance (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        employee_id TEXT NOT NULL,
        date        TEXT NOT NULL,
        status      TEXT NOT NULL,
        created_at  TEXT NOT NULL
    )",
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_attendance_employee_date
        ON attendance (employee_id, date)",
    "CREATE INDEX IF NOT EXISTS idx_attendance_date ON attendance (date)",
    "CREATE INDEX IF NOT EXISTS idx_attendance_status ON attendance (status)",
];

pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

/// In-memory database with the schema applied. Capped at one connection:
/// every connection of a `sqlite::memory:` pool otherwise gets its own
/// private database.
#[cfg(test)]
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    ensure_schema(&pool).await.expect("schema bootstrap");
    pool
}
