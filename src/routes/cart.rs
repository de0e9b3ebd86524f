use actix_session::Session;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::cart::Cart;
use crate::forms::cart::{AddToCartForm, UpdateCartForm};
use crate::repository::DieselRepository;
use crate::routes::{not_found, page_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::cart::{add_to_cart, load_cart, update_cart};
use crate::services::checkout::checkout;
use crate::session::{self, store_cart};

/// Persist the cart, logging instead of failing the request.
fn save(session: &Session, cart: &Cart) {
    if let Err(err) = store_cart(session, cart) {
        log::error!("Failed to store the cart in the session: {err}");
    }
}

#[get("/cart")]
pub async fn show_cart(
    user: Option<AuthenticatedUser>,
    session: Session,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let cart = session::load_cart(&session);

    match load_cart(repo.get_ref(), &cart) {
        Ok(summary) => {
            let mut context = page_context(&flash_messages, user.as_ref(), &session, "cart");
            context.insert("lines", &summary.lines);
            context.insert("total_cents", &summary.total_cents);
            render_template(&tera, "cart/index.html", &context)
        }
        Err(ServiceError::Form(message)) => {
            log::warn!("Dropping a cart that cannot be totalled: {message}");
            save(&session, &Cart::new());
            FlashMessage::error(message).send();
            redirect("/")
        }
        Err(err) => {
            log::error!("Failed to load the cart: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/cart/add/{product_id}")]
pub async fn add_item(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
    tera: web::Data<Tera>,
    web::Form(form): web::Form<AddToCartForm>,
) -> impl Responder {
    let product_id = path.into_inner();
    let mut cart = session::load_cart(&session);

    match add_to_cart(repo.get_ref(), &mut cart, product_id, &form) {
        Ok(_) => {
            save(&session, &cart);
            FlashMessage::success("Product added to cart!").send();
            redirect("/cart")
        }
        Err(ServiceError::NotFound) => not_found(&tera, Some(&user)),
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&format!("/product/{product_id}"))
        }
        Err(err) => {
            log::error!("Failed to add product {product_id} to the cart: {err}");
            FlashMessage::error("Could not add the product to your cart.").send();
            redirect(&format!("/product/{product_id}"))
        }
    }
}

#[post("/cart/update")]
pub async fn update_items(session: Session, body: web::Bytes) -> impl Responder {
    let form: UpdateCartForm = match serde_html_form::from_bytes(&body) {
        Ok(form) => form,
        Err(err) => {
            log::warn!("Malformed cart update: {err}");
            FlashMessage::error("Could not update the cart.").send();
            return redirect("/cart");
        }
    };

    let mut cart = session::load_cart(&session);
    update_cart(&mut cart, &form);
    save(&session, &cart);

    FlashMessage::success("Cart updated.").send();
    redirect("/cart")
}

#[post("/cart/remove/{product_id}")]
pub async fn remove_item(path: web::Path<i32>, session: Session) -> impl Responder {
    let mut cart = session::load_cart(&session);
    cart.remove(path.into_inner());
    save(&session, &cart);

    FlashMessage::info("Item removed.").send();
    redirect("/cart")
}

#[post("/cart/clear")]
pub async fn clear_cart(session: Session) -> impl Responder {
    save(&session, &Cart::new());

    FlashMessage::info("Cart cleared.").send();
    redirect("/")
}

#[post("/cart/checkout")]
pub async fn place_order(
    user: AuthenticatedUser,
    session: Session,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let mut cart = session::load_cart(&session);

    match checkout(repo.get_ref(), &user, &mut cart) {
        Ok(order) => {
            save(&session, &cart);
            FlashMessage::success(format!("Order #{} placed!", order.id)).send();
            redirect(&format!("/my/orders/{}", order.id))
        }
        Err(ServiceError::EmptyCart) => {
            FlashMessage::info("Your cart is empty.").send();
            redirect("/cart")
        }
        Err(ServiceError::InsufficientStock { name }) => {
            FlashMessage::error(format!("Not enough stock for {name}")).send();
            redirect("/cart")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/cart")
        }
        Err(err) => {
            log::error!("Checkout failed for user {}: {err}", user.id);
            FlashMessage::error("Could not place your order.").send();
            redirect("/cart")
        }
    }
}
