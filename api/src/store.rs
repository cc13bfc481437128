//! Submission persistence.
//!
//! The intake handler talks to storage through the [`SubmissionStore`]
//! trait so deployments can swap the backend and tests can run without a
//! live database. The production implementation is Postgres via sqlx;
//! every call is wrapped in a bounded timeout so a hung connection
//! surfaces as an error instead of stalling the request.

use std::time::Duration;

use async_trait::async_trait;
use shared::{NewSubmission, SubmissionRecord};
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

const DEFAULT_TIMEOUT_SECONDS: u64 = 5;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unreachable")]
    Unavailable(#[source] sqlx::Error),

    /// The storage layer re-asserted a constraint and refused the write.
    #[error("storage rejected the write: {0}")]
    Rejected(String),

    #[error("storage operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("submission {0} not found")]
    NotFound(Uuid),
}

#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Persist a validated, sanitized submission with status `new`,
    /// returning its generated identifier.
    async fn insert(&self, submission: NewSubmission) -> Result<Uuid, StoreError>;

    /// Read back a stored submission in its default projection, which
    /// excludes the sensitive intake metadata.
    async fn fetch(&self, id: Uuid) -> Result<SubmissionRecord, StoreError>;
}

/// Postgres-backed store.
pub struct PgSubmissionStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgSubmissionStore {
    pub fn new(pool: PgPool) -> Self {
        Self::with_timeout(pool, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn with_timeout(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    /// Reads `STORE_TIMEOUT_SECONDS` from the environment, falling back
    /// to the default.
    pub fn from_env(pool: PgPool) -> Self {
        let seconds = match std::env::var("STORE_TIMEOUT_SECONDS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(value) if value > 0 => value,
                _ => {
                    tracing::warn!(
                        "Invalid value for STORE_TIMEOUT_SECONDS (`{raw}`), using default {DEFAULT_TIMEOUT_SECONDS}"
                    );
                    DEFAULT_TIMEOUT_SECONDS
                }
            },
            Err(_) => DEFAULT_TIMEOUT_SECONDS,
        };
        Self::with_timeout(pool, Duration::from_secs(seconds))
    }

    async fn bounded<T>(
        &self,
        fut: impl std::future::Future<Output = Result<T, sqlx::Error>> + Send,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(result) => result.map_err(map_sqlx_error),
            Err(_) => Err(StoreError::Timeout(self.timeout)),
        }
    }
}

fn map_sqlx_error(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::Rejected("row not found".to_string()),
        sqlx::Error::Database(db_err) => StoreError::Rejected(db_err.to_string()),
        other => StoreError::Unavailable(other),
    }
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, submission: NewSubmission) -> Result<Uuid, StoreError> {
        let id: Uuid = self
            .bounded(
                sqlx::query_scalar(
                    "INSERT INTO submissions
                         (name, email, phone, company, budget, service, message,
                          source, ip_address, user_agent)
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                     RETURNING id",
                )
                .bind(&submission.name)
                .bind(&submission.email)
                .bind(&submission.phone)
                .bind(&submission.company)
                .bind(&submission.budget)
                .bind(&submission.service)
                .bind(&submission.message)
                .bind(submission.source)
                .bind(&submission.ip_address)
                .bind(&submission.user_agent)
                .fetch_one(&self.pool),
            )
            .await?;

        tracing::info!(id = %id, source = %submission.source, "submission stored");
        Ok(id)
    }

    async fn fetch(&self, id: Uuid) -> Result<SubmissionRecord, StoreError> {
        let record = tokio::time::timeout(
            self.timeout,
            sqlx::query_as::<_, SubmissionRecord>(
                "SELECT id, name, email, phone, company, budget, service, message,
                        source, status, created_at, updated_at
                 FROM submissions
                 WHERE id = $1",
            )
            .bind(id)
            .fetch_one(&self.pool),
        )
        .await
        .map_err(|_| StoreError::Timeout(self.timeout))?;

        match record {
            Ok(record) => Ok(record),
            Err(sqlx::Error::RowNotFound) => Err(StoreError::NotFound(id)),
            Err(other) => Err(map_sqlx_error(other)),
        }
    }
}
