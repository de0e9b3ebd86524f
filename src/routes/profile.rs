use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::profile::ProfileForm;
use crate::repository::DieselRepository;
use crate::routes::{page_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::profile::{load_profile, update_profile};

#[get("/profile")]
pub async fn show_profile(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_profile(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context = page_context(&flash_messages, Some(&user), &session, "profile");
            context.insert("user", &data.user);
            context.insert("orders", &data.orders);
            render_template(&tera, "profile/index.html", &context)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load the profile of user {}: {err}", user.id);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/profile")]
pub async fn save_profile(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ProfileForm>,
) -> impl Responder {
    match update_profile(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Profile updated successfully!").send();
            redirect("/profile")
        }
        Err(ServiceError::Form(message)) if user.is_admin => {
            FlashMessage::error(message).send();
            redirect("/")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/profile")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("That username or email is already in use.").send();
            redirect("/profile")
        }
        Err(err) => {
            log::error!("Failed to update the profile of user {}: {err}", user.id);
            FlashMessage::error("Could not update your profile.").send();
            redirect("/profile")
        }
    }
}
