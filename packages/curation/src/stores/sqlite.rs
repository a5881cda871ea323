//! SQLite subscriber storage.
//!
//! A file-based subscriber backend. Good for:
//! - Local development
//! - Single-server deployments
//! - Testing with persistent data

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;

use crate::error::{CurationError, Result};
use crate::traits::store::SubscriberStore;
use crate::types::subscriber::{subscriber_id, Subscriber, SubscriberProfile};

/// SQLite-based subscriber store.
pub struct SqliteSubscriberStore {
    pool: SqlitePool,
}

impl SqliteSubscriberStore {
    /// Create a new store with the given connection URL.
    ///
    /// # Example URLs
    /// - `sqlite::memory:` - In-memory database (ephemeral)
    /// - `sqlite:subscribers.db?mode=rwc` - Create if not exists
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .map_err(|e| CurationError::Storage(e.to_string().into()))?;

        let store = Self { pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Create an in-memory store (for testing).
    pub async fn in_memory() -> Result<Self> {
        Self::new("sqlite::memory:").await
    }

    /// Run database migrations.
    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS subscribers (
                subscriber_id TEXT PRIMARY KEY,
                email TEXT UNIQUE NOT NULL,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                preferences TEXT NOT NULL,
                digest_content TEXT,
                digest_generated_at TEXT
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| CurationError::Storage(e.to_string().into()))?;

        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[derive(Debug, FromRow)]
struct SubscriberRow {
    subscriber_id: String,
    email: String,
    first_name: String,
    last_name: String,
    preferences: String,
    digest_content: Option<String>,
    digest_generated_at: Option<String>,
}

impl SubscriberRow {
    fn into_subscriber(self) -> Result<Subscriber> {
        let digest_generated_at = match self.digest_generated_at {
            Some(raw) => Some(
                chrono::DateTime::parse_from_rfc3339(&raw)
                    .map_err(|e| CurationError::Storage(format!("Invalid date: {}", e).into()))?
                    .with_timezone(&chrono::Utc),
            ),
            None => None,
        };

        Ok(Subscriber {
            id: self.subscriber_id,
            email: self.email,
            first_name: self.first_name,
            last_name: self.last_name,
            preferences: self.preferences,
            digest_content: self.digest_content,
            digest_generated_at,
        })
    }
}

#[async_trait]
impl SubscriberStore for SqliteSubscriberStore {
    async fn get_by_id(&self, id: &str) -> Result<Option<Subscriber>> {
        let row = sqlx::query_as::<_, SubscriberRow>(
            "SELECT subscriber_id, email, first_name, last_name, preferences, digest_content, digest_generated_at FROM subscribers WHERE subscriber_id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CurationError::Storage(e.to_string().into()))?;

        match row {
            Some(r) => Ok(Some(r.into_subscriber()?)),
            None => Ok(None),
        }
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Subscriber>> {
        self.get_by_id(&subscriber_id(email)).await
    }

    async fn upsert(&self, profile: &SubscriberProfile) -> Result<String> {
        let id = profile.subscriber_id();

        // Digest columns survive profile updates.
        sqlx::query(
            r#"
            INSERT INTO subscribers (subscriber_id, email, first_name, last_name, preferences)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(subscriber_id) DO UPDATE SET
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                preferences = excluded.preferences
            "#,
        )
        .bind(&id)
        .bind(&profile.email)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.preferences)
        .execute(&self.pool)
        .await
        .map_err(|e| CurationError::Storage(e.to_string().into()))?;

        Ok(id)
    }

    async fn set_digest(&self, id: &str, content: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE subscribers SET digest_content = ?, digest_generated_at = ? WHERE subscriber_id = ?",
        )
        .bind(content)
        .bind(chrono::Utc::now().to_rfc3339())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| CurationError::Storage(e.to_string().into()))?;

        if result.rows_affected() == 0 {
            return Err(CurationError::SubscriberNotFound { id: id.to_string() });
        }
        Ok(())
    }
}
