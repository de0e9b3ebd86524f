use serde::Serialize;

use crate::domain::user::User;

/// Identity of the logged-in account, resolved from the session on every request.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
}

impl From<User> for AuthenticatedUser {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            username: value.username,
            email: value.email,
            is_admin: value.is_admin,
        }
    }
}
