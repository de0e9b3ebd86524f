use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::forms::{invalid_fields, sanitize_inline_text};

/// Longest accepted username.
const USERNAME_MAX_LEN: u64 = 150;
/// Shortest accepted password.
const PASSWORD_MIN_LEN: u64 = 8;
const PASSWORD_MAX_LEN: u64 = 128;

pub type AuthFormResult<T> = Result<T, AuthFormError>;

#[derive(Debug, Error)]
pub enum AuthFormError {
    #[error("Please check the following fields: {}", invalid_fields(.0))]
    Validation(#[from] ValidationErrors),
    #[error("Username cannot be empty.")]
    EmptyUsername,
}

/// Registration form submitted from `/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupForm {
    #[validate(length(min = 1, max = USERNAME_MAX_LEN))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = PASSWORD_MIN_LEN, max = PASSWORD_MAX_LEN))]
    pub password: String,
}

/// Sanitized registration data; the password is still in clear text.
#[derive(Debug)]
pub struct SignupPayload {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl SignupForm {
    pub fn into_payload(self) -> AuthFormResult<SignupPayload> {
        let form = SignupForm {
            email: self.email.trim().to_lowercase(),
            ..self
        };
        form.validate()?;

        let username = sanitize_inline_text(&form.username);
        if username.is_empty() {
            return Err(AuthFormError::EmptyUsername);
        }

        Ok(SignupPayload {
            username,
            email: form.email,
            password: form.password,
        })
    }
}

/// Credentials posted to `/login` and `/admin/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

impl LoginForm {
    /// Validate the credentials and normalise the email.
    pub fn into_credentials(self) -> AuthFormResult<LoginForm> {
        let form = LoginForm {
            email: self.email.trim().to_lowercase(),
            password: self.password,
        };
        form.validate()?;
        Ok(form)
    }
}
