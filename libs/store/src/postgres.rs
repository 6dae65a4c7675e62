//! Postgres-backed payment store.
//!
//! The payments table carries a primary-key constraint on the ID column;
//! that constraint, not any in-process state, is what makes allocation safe
//! across processes. Unique-violation errors (SQLSTATE 23505) on insert are
//! mapped to [`StoreError::DuplicateId`] so the creation workflow can
//! re-allocate. Schema provisioning is handled by the deployment, not by
//! this crate.

use std::collections::HashSet;
use std::time::Duration;

use async_trait::async_trait;
use educore_id::PaymentId;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::info;

use crate::{Payment, PaymentStatus, PaymentStore, StoreError};

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Database connection URL.
    pub database_url: String,

    /// Maximum number of connections in the pool.
    pub max_connections: u32,

    /// Minimum number of idle connections.
    pub min_connections: u32,

    /// Connection acquire timeout.
    pub acquire_timeout: Duration,

    /// Idle connection timeout.
    pub idle_timeout: Duration,

    /// Maximum lifetime of a connection.
    pub max_lifetime: Duration,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            database_url: "postgres://localhost/educore".to_string(),
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

impl DbConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/educore".to_string());

        let max_connections = std::env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(10);

        let min_connections = std::env::var("DB_MIN_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(1);

        Self {
            database_url,
            max_connections,
            min_connections,
            ..Default::default()
        }
    }
}

impl<'r> sqlx::FromRow<'r, PgRow> for Payment {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let raw_id: String = row.try_get("id")?;
        let id = raw_id
            .parse::<PaymentId>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "id".into(),
                source: Box::new(e),
            })?;

        let raw_status: String = row.try_get("status")?;
        let status = raw_status
            .parse::<PaymentStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".into(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id,
            student_id: row.try_get("student_id")?,
            edu_center_id: row.try_get("edu_center_id")?,
            price: row.try_get("price")?,
            note: row.try_get("note")?,
            status,
            for_month: row.try_get("for_month")?,
            date_payed: row.try_get("date_payed")?,
        })
    }
}

/// Payment store backed by a Postgres connection pool.
#[derive(Clone)]
pub struct PgPaymentStore {
    pool: PgPool,
}

impl PgPaymentStore {
    /// Wraps an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates a new connection pool and wraps it.
    pub async fn connect(config: &DbConfig) -> Result<Self, StoreError> {
        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "Connecting to database"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(Some(config.idle_timeout))
            .max_lifetime(Some(config.max_lifetime))
            .connect(&config.database_url)
            .await
            .map_err(StoreError::Connect)?;

        info!("Database connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check if the database is reachable.
    pub async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(StoreError::Query)?;
        Ok(())
    }
}

#[async_trait]
impl PaymentStore for PgPaymentStore {
    async fn payment_ids(&self) -> Result<HashSet<PaymentId>, StoreError> {
        let rows = sqlx::query("SELECT id FROM payments")
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::Query)?;

        let mut ids = HashSet::with_capacity(rows.len());
        for row in rows {
            let raw: String = row.try_get("id").map_err(StoreError::Query)?;
            let id = raw
                .parse::<PaymentId>()
                .map_err(|source| StoreError::InvalidId {
                    raw: raw.clone(),
                    source,
                })?;
            ids.insert(id);
        }
        Ok(ids)
    }

    async fn insert(&self, payment: Payment) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO payments (
                id,
                student_id,
                edu_center_id,
                price,
                note,
                status,
                for_month,
                date_payed
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(payment.id.to_string())
        .bind(&payment.student_id)
        .bind(&payment.edu_center_id)
        .bind(payment.price)
        .bind(&payment.note)
        .bind(payment.status.as_str())
        .bind(&payment.for_month)
        .bind(payment.date_payed)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.code().as_deref() == Some("23505") {
                    return StoreError::DuplicateId(payment.id);
                }
            }
            StoreError::Query(e)
        })?;

        Ok(())
    }

    async fn get(&self, id: PaymentId) -> Result<Payment, StoreError> {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            SELECT
                id,
                student_id,
                edu_center_id,
                price,
                note,
                status,
                for_month,
                date_payed
            FROM payments
            WHERE id = $1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(StoreError::Query)?;

        payment.ok_or(StoreError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_config_defaults() {
        let config = DbConfig::default();
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 1);
    }
}
