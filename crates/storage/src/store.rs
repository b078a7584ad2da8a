//! Thin adapter between repositories and the relational backend.
//!
//! Every function runs exactly one parameterized statement on a caller-owned
//! transaction, bounded by the request's [`RequestContext`]. Row streams are
//! dropped before returning, on success and failure alike.

use std::fmt::Display;

use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::{Query, QueryAs, QueryScalar};
use sqlx::{Any, FromRow};

use crate::context::RequestContext;
use crate::error::{Result, StorageError};

pub type StoreTx<'c> = sqlx::Transaction<'c, Any>;

pub type Statement<'q> = Query<'q, Any, AnyArguments<'q>>;

pub type RowsStatement<'q, T> = QueryAs<'q, Any, T, AnyArguments<'q>>;

pub type ScalarStatement<'q, T> = QueryScalar<'q, Any, T, AnyArguments<'q>>;

/// Executes a statement and returns the number of affected rows.
pub async fn execute<'q>(
    ctx: &RequestContext,
    tx: &mut StoreTx<'_>,
    statement: Statement<'q>,
) -> Result<u64> {
    let conn = &mut **tx;
    ctx.run(async move {
        statement
            .execute(conn)
            .await
            .map(|done| done.rows_affected())
            .map_err(StorageError::from)
    })
    .await
}

/// Fetches the single scalar a statement is expected to produce.
pub async fn fetch_scalar<'q, T>(
    ctx: &RequestContext,
    tx: &mut StoreTx<'_>,
    statement: ScalarStatement<'q, T>,
) -> Result<T>
where
    T: Send + Unpin,
    (T,): for<'r> FromRow<'r, AnyRow>,
{
    let conn = &mut **tx;
    ctx.run(async move { statement.fetch_one(conn).await.map_err(StorageError::from) })
        .await
}

/// Fetches the first matching row, if any. Remaining rows are never read.
pub async fn fetch_optional<'q, T>(
    ctx: &RequestContext,
    tx: &mut StoreTx<'_>,
    statement: RowsStatement<'q, T>,
) -> Result<Option<T>>
where
    T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
{
    let conn = &mut **tx;
    ctx.run(async move {
        statement
            .fetch_optional(conn)
            .await
            .map_err(StorageError::from)
    })
    .await
}

/// Fetches every row in the order the backend yields them.
pub async fn fetch_all<'q, T>(
    ctx: &RequestContext,
    tx: &mut StoreTx<'_>,
    statement: RowsStatement<'q, T>,
) -> Result<Vec<T>>
where
    T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
{
    let conn = &mut **tx;
    ctx.run(async move { statement.fetch_all(conn).await.map_err(StorageError::from) })
        .await
}

/// Commits on `Ok`, rolls back on `Err`.
///
/// This is the only place a transaction is completed. The error of a failed
/// outcome is returned untouched; a rollback failure is only logged.
pub async fn finish<T, E>(
    tx: StoreTx<'_>,
    outcome: std::result::Result<T, E>,
) -> std::result::Result<T, E>
where
    E: From<StorageError> + Display,
{
    match outcome {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(|err| E::from(StorageError::from(err)))?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!("Rollback after \"{}\" failed: {}", err, rollback_err);
            }
            Err(err)
        }
    }
}
