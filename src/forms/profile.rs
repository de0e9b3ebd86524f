use serde::Deserialize;
use thiserror::Error;
use validator::ValidateEmail;

use crate::domain::user::UpdateUser;
use crate::forms::non_empty;

const USERNAME_MAX_LEN: usize = 150;

pub type ProfileFormResult<T> = Result<T, ProfileFormError>;

#[derive(Debug, Error)]
pub enum ProfileFormError {
    #[error("Please enter a valid email address.")]
    InvalidEmail,
    #[error("Username is too long.")]
    UsernameTooLong,
}

/// Profile update posted from `/profile`. Blank fields keep the stored value.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ProfileForm {
    pub fn into_update_user(self) -> ProfileFormResult<UpdateUser> {
        let mut update = UpdateUser::new();

        if let Some(username) = non_empty(self.username.as_deref()) {
            if username.chars().count() > USERNAME_MAX_LEN {
                return Err(ProfileFormError::UsernameTooLong);
            }
            update = update.username(username);
        }

        if let Some(email) = non_empty(self.email.as_deref()) {
            let email = email.to_lowercase();
            if !email.validate_email() {
                return Err(ProfileFormError::InvalidEmail);
            }
            update = update.email(email);
        }

        Ok(update)
    }
}
