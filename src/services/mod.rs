use crate::domain::auth::AuthenticatedUser;

pub mod admin;
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod categories;
pub mod checkout;
pub mod errors;
pub mod inquiries;
pub mod orders;
pub mod products;
pub mod profile;
pub mod reports;
pub mod reviews;

pub use errors::{ServiceError, ServiceResult};

/// Fail with `Unauthorized` unless the user is an administrator.
pub fn ensure_admin(user: &AuthenticatedUser) -> ServiceResult<()> {
    if user.is_admin {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}
