use std::collections::HashMap;

use serde::Serialize;

use crate::domain::cart::Cart;
use crate::domain::product::Product;
use crate::forms::cart::{AddToCartForm, UpdateCartForm};
use crate::repository::ProductReader;
use crate::services::{ServiceError, ServiceResult};

pub const CART_TOTAL_TOO_LARGE: &str = "Cart total is too large.";

/// One resolved cart row.
#[derive(Debug, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i32,
    pub line_total_cents: i64,
}

/// Cart contents resolved against the catalog.
#[derive(Debug, Serialize)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub total_cents: i64,
}

impl CartSummary {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Resolves every cart line to its product. Products that no longer exist are skipped.
pub fn load_cart<R>(repo: &R, cart: &Cart) -> ServiceResult<CartSummary>
where
    R: ProductReader + ?Sized,
{
    if cart.is_empty() {
        return Ok(CartSummary {
            lines: Vec::new(),
            total_cents: 0,
        });
    }

    let mut products: HashMap<i32, Product> = repo
        .get_products_by_ids(&cart.product_ids())?
        .into_iter()
        .map(|product| (product.id, product))
        .collect();

    let too_large = || ServiceError::Form(CART_TOTAL_TOO_LARGE.to_string());

    let mut lines = Vec::new();
    let mut total_cents: i64 = 0;
    for (product_id, quantity) in cart.lines() {
        let Some(product) = products.remove(&product_id) else {
            continue;
        };
        let line_total_cents = product
            .price_cents
            .checked_mul(i64::from(quantity))
            .ok_or_else(too_large)?;
        total_cents = total_cents
            .checked_add(line_total_cents)
            .ok_or_else(too_large)?;
        lines.push(CartLine {
            product,
            quantity,
            line_total_cents,
        });
    }

    Ok(CartSummary { lines, total_cents })
}

/// Adds the requested quantity of a product to the cart.
///
/// The quantity already in the cart counts against the stock; when the sum
/// exceeds it the cart is left unchanged.
pub fn add_to_cart<R>(
    repo: &R,
    cart: &mut Cart,
    product_id: i32,
    form: &AddToCartForm,
) -> ServiceResult<Product>
where
    R: ProductReader + ?Sized,
{
    let quantity = form
        .quantity()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let product = repo
        .get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)?;

    let requested = i64::from(cart.quantity(product_id)) + i64::from(quantity);
    if requested > i64::from(product.stock) {
        return Err(ServiceError::Form(format!(
            "Only {} units available for {}.",
            product.stock, product.name
        )));
    }

    cart.add(product_id, quantity);
    Ok(product)
}

/// Applies the posted quantities to lines already in the cart.
pub fn update_cart(cart: &mut Cart, form: &UpdateCartForm) {
    for (product_id, quantity) in form.lines() {
        if cart.contains(product_id) {
            cart.set(product_id, quantity);
        }
    }
}
