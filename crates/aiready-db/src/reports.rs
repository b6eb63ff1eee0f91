//! Database operations for the `reports` table.
//!
//! The store is a plain append-only key-value shape: each row is a
//! self-contained Report keyed by canonical URL, so concurrent analyses of
//! the same URL never race; there is no read-modify-write anywhere.

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;

use aiready_core::Report;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `reports` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReportRow {
    pub id: i64,
    pub canonical_url: String,
    pub fetched_at: DateTime<Utc>,
    pub fetch_ok: bool,
    pub schema_version: i32,
    pub aggregate: f64,
    /// Full Report payload as stored.
    pub report: Value,
    pub created_at: DateTime<Utc>,
}

impl ReportRow {
    /// Deserializes the stored payload back into a [`Report`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Payload`] if the stored JSON no longer matches the
    /// Report shape (e.g., written by an incompatible build).
    pub fn into_report(self) -> Result<Report, DbError> {
        Ok(serde_json::from_value(self.report)?)
    }
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Insert a Report and return its generated id.
///
/// The canonical URL, fetch flag, schema version, and aggregate score are
/// stored alongside the JSONB payload so lookups and listings never unpack it.
///
/// # Errors
///
/// Returns [`DbError::Payload`] if the Report cannot be serialized, or
/// [`DbError::Sqlx`] if the insert fails.
pub async fn insert_report(pool: &PgPool, report: &Report) -> Result<i64, DbError> {
    let payload = serde_json::to_value(report)?;
    let schema_version = i32::try_from(report.schema_version).unwrap_or(i32::MAX);

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO reports \
             (canonical_url, fetched_at, fetch_ok, schema_version, aggregate, report) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id",
    )
    .bind(&report.url)
    .bind(report.fetched_at)
    .bind(report.fetch_ok)
    .bind(schema_version)
    .bind(report.scores.aggregate)
    .bind(payload)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Return the latest and previous Reports for a canonical URL.
///
/// Ordered by `fetched_at DESC` then `id DESC`. A URL with exactly one prior
/// scan yields `(Some(latest), None)`: not an error.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_history(
    pool: &PgPool,
    canonical_url: &str,
) -> Result<(Option<ReportRow>, Option<ReportRow>), DbError> {
    let mut rows = sqlx::query_as::<_, ReportRow>(
        "SELECT id, canonical_url, fetched_at, fetch_ok, schema_version, aggregate, report, created_at \
         FROM reports \
         WHERE canonical_url = $1 \
         ORDER BY fetched_at DESC, id DESC \
         LIMIT 2",
    )
    .bind(canonical_url)
    .fetch_all(pool)
    .await?;

    let latest = if rows.is_empty() {
        None
    } else {
        Some(rows.remove(0))
    };
    let previous = rows.pop();

    Ok((latest, previous))
}

/// List recent Reports, optionally filtered by canonical URL.
///
/// Results are ordered by `fetched_at DESC` then `id DESC`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_reports(
    pool: &PgPool,
    canonical_url: Option<&str>,
    limit: i64,
) -> Result<Vec<ReportRow>, DbError> {
    let rows = match canonical_url {
        Some(url) => {
            sqlx::query_as::<_, ReportRow>(
                "SELECT id, canonical_url, fetched_at, fetch_ok, schema_version, aggregate, report, created_at \
                 FROM reports \
                 WHERE canonical_url = $1 \
                 ORDER BY fetched_at DESC, id DESC \
                 LIMIT $2",
            )
            .bind(url)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, ReportRow>(
                "SELECT id, canonical_url, fetched_at, fetch_ok, schema_version, aggregate, report, created_at \
                 FROM reports \
                 ORDER BY fetched_at DESC, id DESC \
                 LIMIT $1",
            )
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}
