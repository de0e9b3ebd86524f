//! Request extractors for the logged-in account.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpRequest, HttpResponse, ResponseError, web};
use thiserror::Error;

use crate::domain::auth::AuthenticatedUser;
use crate::repository::{DieselRepository, UserReader};

/// Page anonymous visitors are sent to.
pub const LOGIN_PATH: &str = "/login";

/// Rejection for routes that need a logged-in account. Renders as a 303 to the login page.
#[derive(Debug, Error)]
#[error("login required")]
pub struct LoginRequired;

impl ResponseError for LoginRequired {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((header::LOCATION, LOGIN_PATH))
            .finish()
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = LoginRequired;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(resolve_user(req).ok_or(LoginRequired))
    }
}

/// Load the account behind the identity cookie. Stale or malformed identities resolve to `None`.
fn resolve_user(req: &HttpRequest) -> Option<AuthenticatedUser> {
    let identity = req.get_identity().ok()?;
    let user_id = identity.id().ok()?.parse::<i32>().ok()?;

    let repo = req.app_data::<web::Data<DieselRepository>>()?;
    match repo.get_user_by_id(user_id) {
        Ok(Some(user)) => Some(user.into()),
        Ok(None) => {
            log::warn!("Identity refers to missing user {user_id}");
            identity.logout();
            None
        }
        Err(err) => {
            log::error!("Failed to load user {user_id}: {err}");
            None
        }
    }
}
