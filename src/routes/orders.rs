use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{not_found, page_context, render_template};
use crate::services::ServiceError;
use crate::services::orders::{load_my_order, load_my_orders};

#[get("/my/orders")]
pub async fn show_my_orders(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_my_orders(repo.get_ref(), &user) {
        Ok(orders) => {
            let mut context = page_context(&flash_messages, Some(&user), &session, "orders");
            context.insert("orders", &orders);
            render_template(&tera, "orders/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list orders of user {}: {err}", user.id);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/my/orders/{order_id}")]
pub async fn show_my_order(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_my_order(repo.get_ref(), &user, path.into_inner()) {
        Ok(order) => {
            let mut context = page_context(&flash_messages, Some(&user), &session, "orders");
            context.insert("order", &order);
            render_template(&tera, "orders/detail.html", &context)
        }
        Err(ServiceError::NotFound) => not_found(&tera, Some(&user)),
        Err(err) => {
            log::error!("Failed to load an order of user {}: {err}", user.id);
            HttpResponse::InternalServerError().finish()
        }
    }
}
