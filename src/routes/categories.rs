use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::categories::CategoryForm;
use crate::repository::DieselRepository;
use crate::routes::{forbidden, not_found, page_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::categories::{
    create_category, get_category, load_categories, modify_category, remove_category,
};

const CATEGORIES_URL: &str = "/admin/categories";

#[get("/admin/categories")]
pub async fn show_categories(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_categories(repo.get_ref(), &user) {
        Ok(categories) => {
            let mut context =
                page_context(&flash_messages, Some(&user), &session, "admin_categories");
            context.insert("categories", &categories);
            render_template(&tera, "admin/categories/index.html", &context)
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(err) => {
            log::error!("Failed to list categories: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/admin/categories/add")]
pub async fn show_add_category(
    user: AuthenticatedUser,
    session: Session,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    if !user.is_admin {
        return forbidden(&tera, Some(&user));
    }
    let context = page_context(&flash_messages, Some(&user), &session, "admin_categories");
    render_template(&tera, "admin/categories/form.html", &context)
}

#[post("/admin/categories/add")]
pub async fn add_category(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CategoryForm>,
) -> impl Responder {
    match create_category(repo.get_ref(), &user, form) {
        Ok(_) => {
            FlashMessage::success("Category added successfully!").send();
            redirect(CATEGORIES_URL)
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/admin/categories/add")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("This category already exists.").send();
            redirect("/admin/categories/add")
        }
        Err(err) => {
            log::error!("Failed to create category: {err}");
            FlashMessage::error("Could not create the category.").send();
            redirect(CATEGORIES_URL)
        }
    }
}

#[get("/admin/categories/{category_id}/edit")]
pub async fn show_edit_category(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match get_category(repo.get_ref(), &user, path.into_inner()) {
        Ok(category) => {
            let mut context =
                page_context(&flash_messages, Some(&user), &session, "admin_categories");
            context.insert("category", &category);
            render_template(&tera, "admin/categories/form.html", &context)
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(ServiceError::NotFound) => not_found(&tera, Some(&user)),
        Err(err) => {
            log::error!("Failed to load category: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/admin/categories/{category_id}/edit")]
pub async fn edit_category(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<CategoryForm>,
) -> impl Responder {
    let category_id = path.into_inner();
    let edit_url = format!("{CATEGORIES_URL}/{category_id}/edit");

    match modify_category(repo.get_ref(), &user, category_id, form) {
        Ok(_) => {
            FlashMessage::success("Category updated successfully!").send();
            redirect(CATEGORIES_URL)
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(ServiceError::NotFound) => not_found(&tera, Some(&user)),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&edit_url)
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("This category already exists.").send();
            redirect(&edit_url)
        }
        Err(err) => {
            log::error!("Failed to change category {category_id}: {err}");
            FlashMessage::error("Could not update the category.").send();
            redirect(CATEGORIES_URL)
        }
    }
}

#[post("/admin/categories/{category_id}/delete")]
pub async fn delete_category(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let category_id = path.into_inner();

    match remove_category(repo.get_ref(), &user, category_id) {
        Ok(()) => {
            FlashMessage::success("Category deleted successfully!").send();
            redirect(CATEGORIES_URL)
        }
        Err(ServiceError::Unauthorized) => forbidden(&tera, Some(&user)),
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Category not found.").send();
            redirect(CATEGORIES_URL)
        }
        Err(err) => {
            log::error!("Failed to delete category {category_id}: {err}");
            FlashMessage::error("Could not delete the category.").send();
            redirect(CATEGORIES_URL)
        }
    }
}
