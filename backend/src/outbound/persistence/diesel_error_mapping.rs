//! Diesel and pool error mapping into [`ProductRepositoryError`].
//!
//! Database detail is logged at debug level and replaced with a generic
//! message so driver text never reaches a response body.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::ProductRepositoryError;

use super::pool::PoolError;

/// Pool failures mean the database is unreachable.
pub(crate) fn map_pool_error(error: PoolError) -> ProductRepositoryError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    ProductRepositoryError::connection(message)
}

/// Closed connections map to `Connection`; everything else is a `Query`
/// failure.
pub(crate) fn map_diesel_error(error: DieselError) -> ProductRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => ProductRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => ProductRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            ProductRepositoryError::connection("database connection error")
        }
        _ => ProductRepositoryError::query("database error"),
    }
}
