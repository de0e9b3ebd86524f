use thiserror::Error;

use crate::repository::errors::RepositoryError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors returned by the service layer to the route handlers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("conflict")]
    Conflict,
    /// User input was rejected; the message is safe to show.
    #[error("{0}")]
    Form(String),
    #[error("cart is empty")]
    EmptyCart,
    #[error("not enough stock for {name}")]
    InsufficientStock { name: String },
    #[error("internal error")]
    Internal,
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Conflict(message) => {
                log::debug!("Repository conflict: {message}");
                ServiceError::Conflict
            }
            RepositoryError::InsufficientStock { product_id } => ServiceError::InsufficientStock {
                name: format!("product #{product_id}"),
            },
            other => {
                log::error!("Repository error: {other}");
                ServiceError::Internal
            }
        }
    }
}
