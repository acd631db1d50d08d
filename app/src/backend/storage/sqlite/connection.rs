use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::{info, warn};

/// Bumped whenever a table definition changes. Older databases are wiped and
/// rebuilt; there is no data migration.
const SCHEMA_VERSION: i64 = 1;

const TABLES: [&str; 5] = ["users", "vehicles", "maintenance", "expenses", "alerts"];

/// DbConnection manages the local SQLite store
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Open (creating if needed) the database at `url` and bring its schema up to date
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Private in-memory database for tests.
    ///
    /// A single connection that never idles out, since every new connection to
    /// `sqlite::memory:` would see an empty database.
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        use sqlx::sqlite::SqlitePoolOptions;

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await?;
        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn schema_version(pool: &SqlitePool) -> Result<i64> {
        let version: i64 = sqlx::query_scalar("PRAGMA user_version").fetch_one(pool).await?;
        Ok(version)
    }

    /// Create the tables, first dropping everything when the stored schema
    /// version does not match
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        let version = Self::schema_version(pool).await?;
        if version != SCHEMA_VERSION {
            if version != 0 {
                warn!(
                    "Local schema version {} does not match {}, recreating all tables",
                    version, SCHEMA_VERSION
                );
            }
            for table in TABLES {
                sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
                    .execute(pool)
                    .await?;
            }
        }

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                email TEXT NOT NULL UNIQUE,
                phone TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );
            "#,
        )
        .execute(pool)
        .await?;

        // Plate is the natural key of a vehicle within its owner's garage
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS vehicles (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                plate TEXT NOT NULL,
                brand TEXT NOT NULL,
                model TEXT NOT NULL,
                year INTEGER NOT NULL,
                km INTEGER NOT NULL,
                soap_date TEXT NOT NULL,
                permit_date TEXT NOT NULL,
                inspection_date TEXT NOT NULL,
                UNIQUE (user_id, plate)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS maintenance (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                vehicle_id INTEGER NOT NULL,
                vehicle_plate TEXT NOT NULL,
                service_type TEXT NOT NULL,
                date TEXT NOT NULL,
                km INTEGER NOT NULL,
                notes TEXT,
                cost INTEGER
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_maintenance_vehicle_id
            ON maintenance(vehicle_id);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                vehicle_id INTEGER NOT NULL,
                vehicle_plate TEXT NOT NULL,
                category TEXT NOT NULL,
                expense_type TEXT NOT NULL,
                date TEXT NOT NULL,
                amount INTEGER NOT NULL,
                km INTEGER,
                notes TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_expenses_vehicle_id
            ON expenses(vehicle_id);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS alerts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                message TEXT NOT NULL,
                date TEXT NOT NULL,
                alert_key TEXT
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(&format!("PRAGMA user_version = {}", SCHEMA_VERSION))
            .execute(pool)
            .await?;

        info!("Local schema ready (version {})", SCHEMA_VERSION);
        Ok(())
    }
}
