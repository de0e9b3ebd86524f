use actix_identity::Identity;
use actix_session::Session;
use actix_web::{HttpMessage, HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::user::User;
use crate::forms::auth::{LoginForm, SignupForm};
use crate::repository::DieselRepository;
use crate::routes::{page_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::auth::{login_admin, login_customer, register_user};

/// Attach the identity for `user` to the session.
fn start_session(req: &HttpRequest, user: &User) -> bool {
    match Identity::login(&req.extensions(), user.id.to_string()) {
        Ok(_) => true,
        Err(err) => {
            log::error!("Failed to start a session for user {}: {err}", user.id);
            false
        }
    }
}

fn login_page(
    tera: &Tera,
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    session: &Session,
    template: &str,
) -> HttpResponse {
    let context = page_context(flash_messages, user, session, "login");
    render_template(tera, template, &context)
}

#[get("/login")]
pub async fn show_login(
    user: Option<AuthenticatedUser>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    login_page(&tera, &flash_messages, user.as_ref(), &session, "auth/login.html")
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    match login_customer(repo.get_ref(), form) {
        Ok(user) if start_session(&req, &user) => {
            FlashMessage::success("Logged in successfully as User!").send();
            redirect("/")
        }
        Ok(_) => HttpResponse::InternalServerError().finish(),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/login")
        }
        Err(err) => {
            log::error!("Customer login failed: {err}");
            FlashMessage::error("Could not log you in.").send();
            redirect("/login")
        }
    }
}

#[get("/admin/login")]
pub async fn show_admin_login(
    user: Option<AuthenticatedUser>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    login_page(
        &tera,
        &flash_messages,
        user.as_ref(),
        &session,
        "auth/admin_login.html",
    )
}

#[post("/admin/login")]
pub async fn admin_login(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<LoginForm>,
) -> impl Responder {
    match login_admin(repo.get_ref(), form) {
        Ok(user) if start_session(&req, &user) => {
            FlashMessage::success("Logged in successfully as Admin!").send();
            redirect("/admin")
        }
        Ok(_) => HttpResponse::InternalServerError().finish(),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/login")
        }
        Err(err) => {
            log::error!("Admin login failed: {err}");
            FlashMessage::error("Could not log you in.").send();
            redirect("/admin/login")
        }
    }
}

#[get("/signup")]
pub async fn show_signup(
    user: Option<AuthenticatedUser>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = page_context(&flash_messages, user.as_ref(), &session, "signup");
    render_template(&tera, "auth/signup.html", &context)
}

#[post("/signup")]
pub async fn signup(
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<SignupForm>,
) -> impl Responder {
    match register_user(repo.get_ref(), form) {
        Ok(_) => {
            FlashMessage::success("Account created successfully! Please login.").send();
            redirect("/login")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/signup")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("Username or email already registered.").send();
            redirect("/signup")
        }
        Err(err) => {
            log::error!("Signup failed: {err}");
            FlashMessage::error("Could not create your account.").send();
            redirect("/signup")
        }
    }
}

/// Ends the identity. The session, cart included, is purged with it.
#[get("/logout")]
pub async fn logout(user: AuthenticatedUser, identity: Identity) -> impl Responder {
    identity.logout();
    log::info!("User {} logged out", user.id);
    FlashMessage::info("Logged out successfully!").send();
    redirect("/")
}
