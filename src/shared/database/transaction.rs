use anyhow::anyhow;
use sqlx::{Postgres, Transaction};

use crate::shared::database::Database;
use crate::shared::errors::ServiceError;

/// Open a transaction on the shared pool.
///
/// The handle dereferences to `&mut PgConnection`, the same capability the
/// repositories take, so a unit of work runs its permission checks and
/// mutations against one transaction. Dropping the handle without committing
/// rolls back.
pub async fn begin_tx(db: &Database) -> Result<Transaction<'static, Postgres>, ServiceError> {
    db.pool()
        .begin()
        .await
        .map_err(|err| ServiceError::internal(anyhow!("failed to begin transaction: {err}")))
}

/// Commit on success, roll back on error.
///
/// A rollback failure is reported together with the body error and takes
/// precedence for diagnostics.
pub async fn finish_tx<T>(
    tx: Transaction<'_, Postgres>,
    result: Result<T, ServiceError>,
) -> Result<T, ServiceError> {
    match result {
        Ok(value) => {
            tx.commit()
                .await
                .map_err(|err| ServiceError::internal(anyhow!("failed to commit transaction: {err}")))?;
            Ok(value)
        }
        Err(err) => match tx.rollback().await {
            Ok(()) => Err(err),
            Err(rb_err) => Err(ServiceError::internal(anyhow!(
                "tx err: {err}, rb err: {rb_err}"
            ))),
        },
    }
}
