use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::domain::user::{NewUser, UpdateUser, User};
use crate::forms::auth::{LoginForm, SignupForm};
use crate::repository::{UserReader, UserWriter};
use crate::services::{ServiceError, ServiceResult};

pub const EMAIL_TAKEN: &str = "Email already registered.";
pub const USERNAME_TAKEN: &str = "Username already taken.";
pub const INVALID_CUSTOMER_LOGIN: &str = "Invalid credentials or not a regular user.";
pub const INVALID_ADMIN_LOGIN: &str = "Invalid admin credentials.";

/// Shortest password accepted anywhere an account password is set.
const PASSWORD_MIN_LEN: usize = 8;

/// Hash a password using Argon2id with a random salt. Returns a PHC string.
pub fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            log::error!("Failed to hash password: {err}");
            ServiceError::Internal
        })
}

/// Verify a password against a stored PHC string. Malformed hashes never match.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed_hash) = PasswordHash::new(hash) else {
        log::warn!("Stored password hash could not be parsed");
        return false;
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

/// Registers a new customer account.
pub fn register_user<R>(repo: &R, form: SignupForm) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let payload = form
        .into_payload()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo.get_user_by_email(&payload.email)?.is_some() {
        return Err(ServiceError::Form(EMAIL_TAKEN.to_string()));
    }
    if repo.get_user_by_username(&payload.username)?.is_some() {
        return Err(ServiceError::Form(USERNAME_TAKEN.to_string()));
    }

    let password_hash = hash_password(&payload.password)?;
    let new_user = NewUser::new(payload.username, payload.email, password_hash);

    let user = repo.create_user(&new_user).map_err(ServiceError::from)?;
    log::info!("Registered user {} ({})", user.id, user.email);
    Ok(user)
}

/// Authenticates a regular customer. Admin accounts are refused here.
pub fn login_customer<R>(repo: &R, form: LoginForm) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    authenticate(repo, form, false, INVALID_CUSTOMER_LOGIN)
}

/// Authenticates an administrator.
pub fn login_admin<R>(repo: &R, form: LoginForm) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    authenticate(repo, form, true, INVALID_ADMIN_LOGIN)
}

fn authenticate<R>(repo: &R, form: LoginForm, admin: bool, failure: &str) -> ServiceResult<User>
where
    R: UserReader + ?Sized,
{
    let rejected = || ServiceError::Form(failure.to_string());

    let credentials = form.into_credentials().map_err(|_| rejected())?;
    let user = repo
        .get_user_by_email(&credentials.email)?
        .ok_or_else(rejected)?;

    if user.is_admin != admin || !verify_password(&credentials.password, &user.password_hash) {
        return Err(rejected());
    }

    Ok(user)
}

/// Creates an administrator account.
pub fn create_admin<R>(repo: &R, username: &str, email: &str, password: &str) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let form = SignupForm {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    };
    let payload = form
        .into_payload()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    if repo.get_user_by_email(&payload.email)?.is_some() {
        return Err(ServiceError::Form(EMAIL_TAKEN.to_string()));
    }

    let password_hash = hash_password(&payload.password)?;
    let new_user = NewUser::new(payload.username, payload.email, password_hash).admin();
    repo.create_user(&new_user).map_err(ServiceError::from)
}

/// Grants admin rights to the account registered under `email`.
pub fn promote_admin<R>(repo: &R, email: &str) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    let user = repo.get_user_by_email(email)?.ok_or(ServiceError::NotFound)?;
    repo.update_user(user.id, &UpdateUser::new().is_admin(true))
        .map_err(ServiceError::from)
}

/// Replaces the password of the account registered under `email`.
pub fn reset_password<R>(repo: &R, email: &str, password: &str) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(ServiceError::Form(format!(
            "Password must be at least {PASSWORD_MIN_LEN} characters."
        )));
    }

    let user = repo.get_user_by_email(email)?.ok_or(ServiceError::NotFound)?;
    let password_hash = hash_password(password)?;
    repo.update_user(user.id, &UpdateUser::new().password_hash(password_hash))
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::{MockStore, MockUserReader};
    use crate::services::test_support::fixed_datetime;

    fn stored_user(password: &str, is_admin: bool) -> User {
        User {
            id: 5,
            username: "jane".to_string(),
            email: "jane@example.com".to_string(),
            password_hash: hash_password(password).unwrap(),
            is_admin,
            created_at: fixed_datetime(),
        }
    }

    fn signup_form() -> SignupForm {
        SignupForm {
            username: "jane".to_string(),
            email: "Jane@Example.com".to_string(),
            password: "correct horse".to_string(),
        }
    }

    fn login_form(password: &str) -> LoginForm {
        LoginForm {
            email: "jane@example.com".to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn hashed_password_verifies_and_is_not_plaintext() {
        let hash = hash_password("s3cret-pass").unwrap();

        assert_ne!(hash, "s3cret-pass");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret-pass", &hash));
        assert!(!verify_password("wrong", &hash));
        assert!(!verify_password("s3cret-pass", "not a phc string"));
    }

    #[test]
    fn register_user_rejects_existing_email() {
        let mut repo = MockStore::new();
        repo.expect_get_user_by_email()
            .withf(|email| email == "jane@example.com")
            .returning(|_| Ok(Some(stored_user("whatever1", false))));
        repo.expect_create_user().never();

        let result = register_user(&repo, signup_form());

        assert!(matches!(result, Err(ServiceError::Form(message)) if message == EMAIL_TAKEN));
    }

    #[test]
    fn register_user_rejects_taken_username() {
        let mut repo = MockStore::new();
        repo.expect_get_user_by_email().returning(|_| Ok(None));
        repo.expect_get_user_by_username()
            .returning(|_| Ok(Some(stored_user("whatever1", false))));
        repo.expect_create_user().never();

        let result = register_user(&repo, signup_form());

        assert!(matches!(result, Err(ServiceError::Form(message)) if message == USERNAME_TAKEN));
    }

    #[test]
    fn register_user_stores_hashed_customer() {
        let mut repo = MockStore::new();
        repo.expect_get_user_by_email().returning(|_| Ok(None));
        repo.expect_get_user_by_username().returning(|_| Ok(None));
        repo.expect_create_user()
            .times(1)
            .withf(|new_user| {
                new_user.email == "jane@example.com"
                    && !new_user.is_admin
                    && new_user.password_hash != "correct horse"
                    && verify_password("correct horse", &new_user.password_hash)
            })
            .returning(|new_user| {
                Ok(User {
                    id: 11,
                    username: new_user.username.clone(),
                    email: new_user.email.clone(),
                    password_hash: new_user.password_hash.clone(),
                    is_admin: new_user.is_admin,
                    created_at: fixed_datetime(),
                })
            });

        let user = register_user(&repo, signup_form()).unwrap();

        assert_eq!(user.id, 11);
    }

    #[test]
    fn customer_login_checks_password_and_role() {
        let mut repo = MockUserReader::new();
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(stored_user("correct horse", false))));

        assert!(login_customer(&repo, login_form("correct horse")).is_ok());
        let err = login_customer(&repo, login_form("wrong horse")).unwrap_err();
        assert!(matches!(err, ServiceError::Form(message) if message == INVALID_CUSTOMER_LOGIN));
        let err = login_admin(&repo, login_form("correct horse")).unwrap_err();
        assert!(matches!(err, ServiceError::Form(message) if message == INVALID_ADMIN_LOGIN));
    }

    #[test]
    fn admin_cannot_use_customer_login() {
        let mut repo = MockUserReader::new();
        repo.expect_get_user_by_email()
            .returning(|_| Ok(Some(stored_user("correct horse", true))));

        assert!(login_customer(&repo, login_form("correct horse")).is_err());
        assert!(login_admin(&repo, login_form("correct horse")).is_ok());
    }

    #[test]
    fn reset_password_rejects_short_password() {
        let repo = MockStore::new();

        let result = reset_password(&repo, "jane@example.com", "short");

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
