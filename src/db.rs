use crate::config::Config;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::time::Duration;

pub type DbPool = Pool<SqliteConnectionManager>;

// The booking platform owns these tables; the schema is applied here so a
// fresh database (local dev, tests) has the shape the queries expect.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS facilities (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    address TEXT NOT NULL DEFAULT '',
    status TEXT NOT NULL DEFAULT 'pending',
    venue_type TEXT NOT NULL DEFAULT 'Indoor'
);

CREATE TABLE IF NOT EXISTS courts (
    id INTEGER PRIMARY KEY,
    facility_id INTEGER NOT NULL REFERENCES facilities(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    sport_type TEXT NOT NULL,
    price_per_hour REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_courts_facility_id ON courts(facility_id);

CREATE TABLE IF NOT EXISTS bookings (
    id INTEGER PRIMARY KEY,
    court_id INTEGER NOT NULL REFERENCES courts(id) ON DELETE CASCADE,
    user_id INTEGER,
    booking_start_time TEXT NOT NULL,
    booking_end_time TEXT NOT NULL,
    total_price REAL NOT NULL,
    status TEXT NOT NULL DEFAULT 'Confirmed'
);

CREATE INDEX IF NOT EXISTS idx_bookings_court_id ON bookings(court_id);
"#;

// Per-connection setting, so it runs on every connection the pool opens.
fn configure_connection(conn: &mut Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")
}

pub fn init(config: &Config) -> anyhow::Result<DbPool> {
    let manager = if config.sqlite_path == ":memory:" {
        SqliteConnectionManager::memory()
    } else {
        // Ensure data directory exists
        if let Some(parent) = Path::new(&config.sqlite_path).parent() {
            fs::create_dir_all(parent)?;
        }
        SqliteConnectionManager::file(&config.sqlite_path)
    }
    .with_init(configure_connection);

    let pool = Pool::builder()
        .max_size(config.pool_max_size)
        .connection_timeout(Duration::from_secs(config.pool_timeout_secs))
        .build(manager)?;

    migrate(&pool)?;

    Ok(pool)
}

pub fn migrate(pool: &DbPool) -> anyhow::Result<()> {
    let conn = pool.get()?;
    conn.execute_batch(SCHEMA)?;

    tracing::debug!("Database schema initialized");
    Ok(())
}

/// Round-trips a trivial query through the pool.
pub fn ping(pool: &DbPool) -> anyhow::Result<()> {
    let conn = pool.get()?;
    let _: i64 = conn.query_row("SELECT 1", [], |row| row.get(0))?;
    Ok(())
}

#[cfg(test)]
pub(crate) fn test_pool() -> DbPool {
    let manager = SqliteConnectionManager::memory().with_init(configure_connection);
    let pool = Pool::builder().max_size(1).build(manager).unwrap();
    migrate(&pool).unwrap();
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrate_is_idempotent() {
        let pool = test_pool();
        migrate(&pool).unwrap();

        let conn = pool.get().unwrap();
        let tables: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('facilities', 'courts', 'bookings')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 3);
    }

    #[test]
    fn test_ping() {
        let pool = test_pool();
        assert!(ping(&pool).is_ok());
    }

    #[test]
    fn test_init_in_memory() {
        let config = Config {
            sqlite_path: ":memory:".to_string(),
            pool_max_size: 1,
            ..Config::default()
        };
        let pool = init(&config).unwrap();
        assert!(ping(&pool).is_ok());
    }

    #[test]
    fn test_foreign_keys_on_every_connection() {
        let config = Config {
            sqlite_path: ":memory:".to_string(),
            pool_max_size: 2,
            ..Config::default()
        };
        let pool = init(&config).unwrap();

        let first = pool.get().unwrap();
        let second = pool.get().unwrap();
        for conn in [&first, &second] {
            let enabled: i64 = conn
                .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
                .unwrap();
            assert_eq!(enabled, 1);
        }
    }

    #[test]
    fn test_court_requires_existing_facility() {
        let pool = test_pool();
        let conn = pool.get().unwrap();
        let result = conn.execute(
            "INSERT INTO courts (facility_id, name, sport_type, price_per_hour) VALUES (999, 'Ghost', 'Tennis', 10.0)",
            [],
        );
        assert!(result.is_err());
    }
}
