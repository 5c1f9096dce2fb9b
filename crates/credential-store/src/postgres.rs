//! PostgreSQL credential store.

use crate::error::StoreError;
use crate::store::{escape_like, CredentialStore};
use crate::types::{Credential, StoredCredential};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Credential store backed by a shared Postgres connection pool.
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    /// Wrap an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;

        info!("Connected to Postgres (max_connections={})", max_connections);
        Ok(Self::new(pool))
    }

    /// Apply embedded schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    #[instrument(skip_all)]
    async fn create(&self, credential: &Credential) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO passwords (phone, site, password) VALUES ($1, $2, $3)")
            .bind(&credential.phone)
            .bind(&credential.site)
            .bind(&credential.secret)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    #[instrument(skip_all)]
    async fn list_by_phone(&self, phone: &str) -> Result<Vec<StoredCredential>, StoreError> {
        let rows = sqlx::query_as::<_, StoredCredential>(
            "SELECT site, password FROM passwords WHERE phone = $1 ORDER BY id",
        )
        .bind(phone)
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} rows", rows.len());
        if rows.is_empty() {
            return Err(StoreError::NoCredentials);
        }
        Ok(rows)
    }

    #[instrument(skip_all)]
    async fn search_by_phone_and_site(
        &self,
        phone: &str,
        site_fragment: &str,
    ) -> Result<Vec<StoredCredential>, StoreError> {
        let pattern = format!("%{}%", escape_like(site_fragment));
        let rows = sqlx::query_as::<_, StoredCredential>(
            r"SELECT site, password
              FROM passwords
              WHERE phone = $1 AND site ILIKE $2 ESCAPE '\'
              ORDER BY id",
        )
        .bind(phone)
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;

        debug!("Fetched {} rows", rows.len());
        if rows.is_empty() {
            return Err(StoreError::NoMatchingSite);
        }
        Ok(rows)
    }

    #[instrument(skip_all)]
    async fn register_owner(&self, phone: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO owners (phone) VALUES ($1) ON CONFLICT (phone) DO NOTHING")
            .bind(phone)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}
