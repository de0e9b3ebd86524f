//! Back-office pages: dashboard, orders, customers, reports, reviews and inquiries.

use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use serde::Deserialize;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::order::OrderStatus;
use crate::forms::orders::OrderStatusForm;
use crate::repository::DieselRepository;
use crate::routes::{forbidden, not_found, page_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::admin::{CustomersQuery, load_customers_page, load_dashboard};
use crate::services::inquiries::{PageQuery, load_inquiries_page};
use crate::services::orders::{
    AdminOrdersQuery, change_order_status, load_order_detail, load_orders_page,
};
use crate::services::reports::load_reports;
use crate::services::reviews::{approve_review, load_reviews_page, remove_review};

#[get("/admin")]
pub async fn show_dashboard(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_dashboard(repo.get_ref(), &user) {
        Ok(totals) => {
            let mut context = page_context(&flash_messages, Some(&user), &session, "admin");
            context.insert("totals", &totals);
            render_template(&tera, "admin/dashboard.html", &context)
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(err) => {
            log::error!("Failed to load the dashboard: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/admin/orders")]
pub async fn show_orders(
    params: web::Query<AdminOrdersQuery>,
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_orders_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context =
                page_context(&flash_messages, Some(&user), &session, "admin_orders");
            context.insert("orders", &data.orders);
            context.insert("status", data.status.map(|status| status.as_str()).unwrap_or(""));
            context.insert("statuses", &OrderStatus::ALL);
            render_template(&tera, "admin/orders/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(err) => {
            log::error!("Failed to list orders: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/admin/orders/{order_id}")]
pub async fn show_order(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_order_detail(repo.get_ref(), &user, path.into_inner()) {
        Ok(data) => {
            let mut context =
                page_context(&flash_messages, Some(&user), &session, "admin_orders");
            context.insert("order", &data.order);
            context.insert("customer", &data.customer);
            context.insert("statuses", &OrderStatus::ALL);
            render_template(&tera, "admin/orders/detail.html", &context)
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(ServiceError::NotFound) => not_found(&tera, Some(&user)),
        Err(err) => {
            log::error!("Failed to load order: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/orders/{order_id}/status")]
pub async fn update_order_status(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<OrderStatusForm>,
) -> impl Responder {
    let order_id = path.into_inner();

    match change_order_status(repo.get_ref(), &user, order_id, &form) {
        Ok(_) => {
            FlashMessage::success("Order status updated!").send();
            redirect("/admin/orders")
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(ServiceError::NotFound) => not_found(&tera, Some(&user)),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/orders")
        }
        Err(err) => {
            log::error!("Failed to update order {order_id}: {err}");
            FlashMessage::error("Could not update the order.").send();
            redirect("/admin/orders")
        }
    }
}

#[get("/admin/customers")]
pub async fn show_customers(
    params: web::Query<CustomersQuery>,
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_customers_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context =
                page_context(&flash_messages, Some(&user), &session, "admin_customers");
            context.insert("customers", &data.customers);
            context.insert("search", data.search.as_deref().unwrap_or(""));
            render_template(&tera, "admin/customers.html", &context)
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(err) => {
            log::error!("Failed to list customers: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/admin/reports")]
pub async fn show_reports(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_reports(repo.get_ref(), &user) {
        Ok(data) => {
            let mut context =
                page_context(&flash_messages, Some(&user), &session, "admin_reports");
            context.insert("totals", &data.totals);
            context.insert("top_products", &data.top_products);
            context.insert("recent_orders", &data.recent_orders);
            context.insert("monthly_sales", &data.monthly_sales);
            context.insert("categories", &data.categories);
            render_template(&tera, "admin/reports.html", &context)
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(err) => {
            log::error!("Failed to build reports: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewsQuery {
    pub page: Option<usize>,
}

#[get("/admin/reviews")]
pub async fn show_reviews(
    params: web::Query<ReviewsQuery>,
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_reviews_page(repo.get_ref(), &user, params.page) {
        Ok(reviews) => {
            let mut context =
                page_context(&flash_messages, Some(&user), &session, "admin_reviews");
            context.insert("reviews", &reviews);
            render_template(&tera, "admin/reviews.html", &context)
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(err) => {
            log::error!("Failed to list reviews: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/reviews/{review_id}/approve")]
pub async fn approve(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match approve_review(repo.get_ref(), &user, path.into_inner()) {
        Ok(_) => {
            FlashMessage::success("Review approved.").send();
            redirect("/admin/reviews")
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(ServiceError::NotFound) => not_found(&tera, Some(&user)),
        Err(err) => {
            log::error!("Failed to approve review: {err}");
            FlashMessage::error("Could not approve the review.").send();
            redirect("/admin/reviews")
        }
    }
}

#[post("/admin/reviews/{review_id}/delete")]
pub async fn delete_review(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    match remove_review(repo.get_ref(), &user, path.into_inner()) {
        Ok(()) => {
            FlashMessage::warning("Review deleted.").send();
            redirect("/admin/reviews")
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(ServiceError::NotFound) => not_found(&tera, Some(&user)),
        Err(err) => {
            log::error!("Failed to delete review: {err}");
            FlashMessage::error("Could not delete the review.").send();
            redirect("/admin/reviews")
        }
    }
}

#[get("/admin/inquiries")]
pub async fn show_inquiries(
    params: web::Query<PageQuery>,
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_inquiries_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(inquiries) => {
            let mut context =
                page_context(&flash_messages, Some(&user), &session, "admin_inquiries");
            context.insert("inquiries", &inquiries);
            render_template(&tera, "admin/inquiries.html", &context)
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(err) => {
            log::error!("Failed to list inquiries: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
