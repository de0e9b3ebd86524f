use diesel::r2d2::PoolError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use thiserror::Error;

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Errors surfaced by the Diesel repository.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The targeted row does not exist.
    #[error("record not found")]
    NotFound,
    /// A unique or foreign key constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),
    /// A stock decrement would have taken the product below zero.
    #[error("insufficient stock for product {product_id}")]
    InsufficientStock { product_id: i32 },
    #[error("database error: {0}")]
    Database(DieselError),
    #[error("connection pool error: {0}")]
    Pool(#[from] PoolError),
}

impl From<DieselError> for RepositoryError {
    fn from(value: DieselError) -> Self {
        match value {
            DieselError::NotFound => RepositoryError::NotFound,
            DieselError::DatabaseError(
                kind @ (DatabaseErrorKind::UniqueViolation | DatabaseErrorKind::ForeignKeyViolation),
                info,
            ) => {
                let message = info.message().to_string();
                log::debug!("Constraint violation ({kind:?}): {message}");
                RepositoryError::Conflict(message)
            }
            other => RepositoryError::Database(other),
        }
    }
}
