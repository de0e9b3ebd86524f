use crate::domain::auth::AuthenticatedUser;
use crate::domain::order::{Order, OrderListQuery};
use crate::domain::user::User;
use crate::forms::profile::ProfileForm;
use crate::repository::{OrderReader, UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

pub const ADMIN_HAS_NO_PROFILE: &str = "Admin does not have a profile page.";

pub struct ProfilePageData {
    pub user: User,
    pub orders: Vec<Order>,
}

/// Profile of the logged-in customer along with their orders.
pub fn load_profile<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ProfilePageData>
where
    R: UserReader + OrderReader + ?Sized,
{
    if user.is_admin {
        return Err(ServiceError::Form(ADMIN_HAS_NO_PROFILE.to_string()));
    }

    let account = repo
        .get_user_by_id(user.id)?
        .ok_or(ServiceError::NotFound)?;
    let (_, orders) = repo.list_orders(OrderListQuery::new().user_id(user.id))?;

    Ok(ProfilePageData {
        user: account,
        orders,
    })
}

/// Applies the profile form. Taken usernames or emails surface as `Conflict`.
pub fn update_profile<R>(repo: &R, user: &AuthenticatedUser, form: ProfileForm) -> ServiceResult<User>
where
    R: UserWriter + ?Sized,
{
    if user.is_admin {
        return Err(ServiceError::Form(ADMIN_HAS_NO_PROFILE.to_string()));
    }

    let update = form
        .into_update_user()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let updated = repo.update_user(user.id, &update)?;
    log::info!("User {} updated their profile", updated.id);
    Ok(updated)
}
