use std::collections::HashMap;
use std::path::Path;

use actix_files::Files;
use actix_session::Session;
use actix_web::http::{StatusCode, header};
use actix_web::{HttpResponse, web};
use actix_web_flash_messages::{IncomingFlashMessages, Level};
use serde::Serialize;
use tera::{Context, Tera, Value};

use crate::domain::auth::AuthenticatedUser;
use crate::forms::products::UPLOAD_URL_PREFIX;
use crate::session::load_cart;

pub mod admin;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod main;
pub mod orders;
pub mod products;
pub mod profile;

/// Register every storefront and back-office route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(main::show_index)
        .service(main::show_product)
        .service(main::add_review)
        .service(main::show_about)
        .service(main::show_contact)
        .service(main::send_contact)
        .service(cart::show_cart)
        .service(cart::add_item)
        .service(cart::update_items)
        .service(cart::remove_item)
        .service(cart::clear_cart)
        .service(cart::place_order)
        .service(orders::show_my_orders)
        .service(orders::show_my_order)
        .service(profile::show_profile)
        .service(profile::save_profile)
        .service(auth::show_login)
        .service(auth::login)
        .service(auth::show_signup)
        .service(auth::signup)
        .service(auth::show_admin_login)
        .service(auth::admin_login)
        .service(auth::logout)
        .service(admin::show_dashboard)
        .service(admin::show_orders)
        .service(admin::show_order)
        .service(admin::update_order_status)
        .service(products::show_products)
        .service(products::show_new_product)
        .service(products::add_product)
        .service(products::show_edit_product)
        .service(products::edit_product)
        .service(products::remove_product)
        .service(admin::show_customers)
        .service(categories::show_categories)
        .service(categories::show_add_category)
        .service(categories::add_category)
        .service(categories::show_edit_category)
        .service(categories::edit_category)
        .service(categories::delete_category)
        .service(admin::show_reports)
        .service(admin::show_reviews)
        .service(admin::approve)
        .service(admin::delete_review)
        .service(admin::show_inquiries);
}

/// Serve uploaded images from `upload_dir` and the remaining static files from `./assets`.
pub fn configure_assets(cfg: &mut web::ServiceConfig, upload_dir: &Path) {
    cfg.service(Files::new(UPLOAD_URL_PREFIX, upload_dir))
        .service(Files::new("/assets", "./assets"));
}

/// Flash message as rendered by `base.html`.
#[derive(Debug, Serialize)]
struct Alert {
    level: &'static str,
    content: String,
}

fn alert_class(level: Level) -> &'static str {
    match level {
        Level::Error => "danger",
        Level::Warning => "warning",
        Level::Success => "success",
        _ => "info",
    }
}

/// Context shared by every page: alerts, the current user, cart badge and active menu entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    cart_count: i64,
    current_page: &str,
) -> Context {
    let alerts: Vec<Alert> = flash_messages
        .iter()
        .map(|message| Alert {
            level: alert_class(message.level()),
            content: message.content().to_string(),
        })
        .collect();

    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_user", &user);
    context.insert("cart_count", &cart_count);
    context.insert("current_page", current_page);
    context
}

/// `base_context` with the cart badge read from the session.
pub fn page_context(
    flash_messages: &IncomingFlashMessages,
    user: Option<&AuthenticatedUser>,
    session: &Session,
    current_page: &str,
) -> Context {
    let cart_count = load_cart(session).total_quantity();
    base_context(flash_messages, user, cart_count, current_page)
}

pub fn render_template(tera: &Tera, template: &str, context: &Context) -> HttpResponse {
    render_with_status(tera, template, context, StatusCode::OK)
}

fn render_with_status(
    tera: &Tera,
    template: &str,
    context: &Context,
    status: StatusCode,
) -> HttpResponse {
    match tera.render(template, context) {
        Ok(body) => HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template '{template}': {err:?}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// 303 redirect, so a POST is followed by a GET.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

pub fn forbidden(tera: &Tera, user: Option<&AuthenticatedUser>) -> HttpResponse {
    error_page(tera, user, "errors/403.html", StatusCode::FORBIDDEN)
}

pub fn not_found(tera: &Tera, user: Option<&AuthenticatedUser>) -> HttpResponse {
    error_page(tera, user, "errors/404.html", StatusCode::NOT_FOUND)
}

fn error_page(
    tera: &Tera,
    user: Option<&AuthenticatedUser>,
    template: &str,
    status: StatusCode,
) -> HttpResponse {
    let mut context = Context::new();
    context.insert("alerts", &Vec::<Alert>::new());
    context.insert("current_user", &user);
    context.insert("cart_count", &0);
    context.insert("current_page", "");
    render_with_status(tera, template, &context, status)
}

/// Format an amount in cents as `12.50`.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{sign}{}.{:02}", cents / 100, cents % 100)
}

fn money_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let cents = value
        .as_i64()
        .or_else(|| value.as_f64().map(|cents| cents.round() as i64))
        .ok_or_else(|| tera::Error::msg(format!("money filter expects an integer, got {value}")))?;
    Ok(Value::String(format_cents(cents)))
}

/// Load templates from `glob` and register the custom filters.
pub fn build_tera(glob: &str) -> tera::Result<Tera> {
    let mut tera = Tera::new(glob)?;
    tera.register_filter("money", money_filter);
    Ok(tera)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cents_are_formatted_with_two_decimals() {
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(1250), "12.50");
        assert_eq!(format_cents(-199), "-1.99");
    }

    #[test]
    fn money_filter_rejects_non_numbers() {
        let args = HashMap::new();
        assert_eq!(
            money_filter(&Value::from(4999), &args).unwrap(),
            Value::String("49.99".to_string())
        );
        assert!(money_filter(&Value::from("abc"), &args).is_err());
    }

    #[test]
    fn redirect_uses_see_other() {
        let response = redirect("/cart");
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/cart"
        );
    }
}
