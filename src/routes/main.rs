use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::contact::ContactForm;
use crate::forms::reviews::ReviewForm;
use crate::repository::DieselRepository;
use crate::routes::{not_found, page_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::catalog::{CatalogQuery, load_home_page, load_product_page};
use crate::services::inquiries::submit_inquiry;
use crate::services::reviews::submit_review;
use crate::session::{load_recently_viewed, store_recently_viewed};

#[get("/")]
pub async fn show_index(
    params: web::Query<CatalogQuery>,
    user: Option<AuthenticatedUser>,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_home_page(repo.get_ref(), params.into_inner()) {
        Ok(data) => {
            let mut context = page_context(&flash_messages, user.as_ref(), &session, "index");
            context.insert("products", &data.products);
            context.insert("categories", &data.categories);
            context.insert("subcategories", &data.subcategories);
            let q = data.q.unwrap_or_default();
            let category = data.category.unwrap_or_default();
            let subcategory = data.subcategory.unwrap_or_default();
            let filters = [
                ("q", q.as_str()),
                ("category", category.as_str()),
                ("subcategory", subcategory.as_str()),
            ];
            let page_base = match serde_html_form::to_string(&filters) {
                Ok(query) => format!("/?{query}&"),
                Err(err) => {
                    log::warn!("Failed to encode catalog filters: {err}");
                    "/?".to_string()
                }
            };
            context.insert("q", &q);
            context.insert("category", &category);
            context.insert("subcategory", &subcategory);
            context.insert("page_base", &page_base);
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load the catalog: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/product/{product_id}")]
pub async fn show_product(
    path: web::Path<i32>,
    user: Option<AuthenticatedUser>,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut recently_viewed = load_recently_viewed(&session);

    match load_product_page(repo.get_ref(), path.into_inner(), &mut recently_viewed) {
        Ok(data) => {
            if let Err(err) = store_recently_viewed(&session, &recently_viewed) {
                log::warn!("Failed to remember viewed product: {err}");
            }
            let mut context = page_context(&flash_messages, user.as_ref(), &session, "index");
            context.insert("product", &data.product);
            context.insert("category", &data.category);
            context.insert("stock_status", data.stock_status);
            context.insert("reviews", &data.reviews);
            context.insert("recently_viewed", &data.recently_viewed);
            render_template(&tera, "main/product.html", &context)
        }
        Err(ServiceError::NotFound) => not_found(&tera, user.as_ref()),
        Err(err) => {
            log::error!("Failed to load a product page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/product/{product_id}/reviews")]
pub async fn add_review(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<ReviewForm>,
) -> impl Responder {
    let product_id = path.into_inner();
    let product_url = format!("/product/{product_id}");

    match submit_review(repo.get_ref(), &user, product_id, form) {
        Ok(_) => {
            FlashMessage::success("Review submitted for moderation.").send();
            redirect(&product_url)
        }
        Err(ServiceError::NotFound) => not_found(&tera, Some(&user)),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&product_url)
        }
        Err(err) => {
            log::error!("Failed to store a review: {err}");
            FlashMessage::error("Could not submit your review.").send();
            redirect(&product_url)
        }
    }
}

#[get("/about")]
pub async fn show_about(
    user: Option<AuthenticatedUser>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = page_context(&flash_messages, user.as_ref(), &session, "about");
    render_template(&tera, "main/about.html", &context)
}

#[get("/contact")]
pub async fn show_contact(
    user: Option<AuthenticatedUser>,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let context = page_context(&flash_messages, user.as_ref(), &session, "contact");
    render_template(&tera, "main/contact.html", &context)
}

#[post("/contact")]
pub async fn send_contact(
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<ContactForm>,
) -> impl Responder {
    match submit_inquiry(repo.get_ref(), form) {
        Ok(_) => {
            FlashMessage::success("Thank you for contacting us! We'll get back to you soon.")
                .send();
            redirect("/contact")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/contact")
        }
        Err(err) => {
            log::error!("Failed to store an inquiry: {err}");
            FlashMessage::error("Could not send your message.").send();
            redirect("/contact")
        }
    }
}
