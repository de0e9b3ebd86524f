use actix_multipart::form::MultipartForm;
use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::config::ServerConfig;
use crate::domain::auth::AuthenticatedUser;
use crate::forms::products::ProductForm;
use crate::repository::DieselRepository;
use crate::routes::{forbidden, not_found, page_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::products::{
    ProductsQuery, create_product, delete_product, load_product_form, load_products_page,
    update_product,
};

const PRODUCTS_URL: &str = "/admin/products";

#[get("/admin/products")]
pub async fn show_products(
    params: web::Query<ProductsQuery>,
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_products_page(repo.get_ref(), &user, params.into_inner()) {
        Ok(data) => {
            let mut context =
                page_context(&flash_messages, Some(&user), &session, "admin_products");
            context.insert("products", &data.products);
            context.insert("categories", &data.categories);
            render_template(&tera, "admin/products/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(err) => {
            log::error!("Failed to list products: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

fn product_form_page(
    product_id: Option<i32>,
    user: &AuthenticatedUser,
    session: &Session,
    repo: &DieselRepository,
    flash_messages: &IncomingFlashMessages,
    tera: &Tera,
) -> HttpResponse {
    match load_product_form(repo, user, product_id) {
        Ok(data) => {
            let mut context = page_context(flash_messages, Some(user), session, "admin_products");
            context.insert("product", &data.product);
            context.insert("categories", &data.categories);
            render_template(tera, "admin/products/form.html", &context)
        }
        Err(ServiceError::Unauthorized) => forbidden(tera, Some(user)),
        Err(ServiceError::NotFound) => not_found(tera, Some(user)),
        Err(err) => {
            log::error!("Failed to load the product form: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/admin/products/new")]
pub async fn show_new_product(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    product_form_page(None, &user, &session, &repo, &flash_messages, &tera)
}

#[post("/admin/products/new")]
pub async fn add_product(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    MultipartForm(form): MultipartForm<ProductForm>,
) -> impl Responder {
    match create_product(repo.get_ref(), &user, form, &config.upload_dir) {
        Ok(_) => {
            FlashMessage::success("Product created").send();
            redirect(PRODUCTS_URL)
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/products/new")
        }
        Err(err) => {
            log::error!("Failed to create a product: {err}");
            FlashMessage::error("Could not create the product.").send();
            redirect(PRODUCTS_URL)
        }
    }
}

#[get("/admin/products/{product_id}/edit")]
pub async fn show_edit_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    product_form_page(
        Some(path.into_inner()),
        &user,
        &session,
        &repo,
        &flash_messages,
        &tera,
    )
}

#[post("/admin/products/{product_id}/edit")]
pub async fn edit_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
    MultipartForm(form): MultipartForm<ProductForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match update_product(repo.get_ref(), &user, product_id, form, &config.upload_dir) {
        Ok(_) => {
            FlashMessage::success("Product updated").send();
            redirect(PRODUCTS_URL)
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(ServiceError::NotFound) => not_found(&tera, Some(&user)),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&format!("{PRODUCTS_URL}/{product_id}/edit"))
        }
        Err(err) => {
            log::error!("Failed to update product {product_id}: {err}");
            FlashMessage::error("Could not update the product.").send();
            redirect(PRODUCTS_URL)
        }
    }
}

#[post("/admin/products/{product_id}/delete")]
pub async fn remove_product(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let product_id = path.into_inner();

    match delete_product(repo.get_ref(), &user, product_id) {
        Ok(()) => {
            FlashMessage::warning("Product deleted").send();
            redirect(PRODUCTS_URL)
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(ServiceError::NotFound) => not_found(&tera, Some(&user)),
        Err(err) => {
            log::error!("Failed to delete product {product_id}: {err}");
            FlashMessage::error("Could not delete the product.").send();
            redirect(PRODUCTS_URL)
        }
    }
}
