//! Typed access to the values kept in the cookie session.

use actix_session::{Session, SessionInsertError};

use crate::domain::cart::Cart;
use crate::domain::recently_viewed::RecentlyViewed;

pub const CART_KEY: &str = "cart";
pub const RECENTLY_VIEWED_KEY: &str = "recently_viewed";

/// Cart stored in the session. A missing or unreadable value is an empty cart.
pub fn load_cart(session: &Session) -> Cart {
    session
        .get::<Cart>(CART_KEY)
        .unwrap_or_else(|err| {
            log::warn!("Discarding unreadable cart: {err}");
            None
        })
        .unwrap_or_default()
}

pub fn store_cart(session: &Session, cart: &Cart) -> Result<(), SessionInsertError> {
    if cart.is_empty() {
        session.remove(CART_KEY);
        return Ok(());
    }
    session.insert(CART_KEY, cart)
}

pub fn load_recently_viewed(session: &Session) -> RecentlyViewed {
    session
        .get::<RecentlyViewed>(RECENTLY_VIEWED_KEY)
        .unwrap_or_else(|err| {
            log::warn!("Discarding unreadable recently viewed list: {err}");
            None
        })
        .unwrap_or_default()
}

pub fn store_recently_viewed(
    session: &Session,
    viewed: &RecentlyViewed,
) -> Result<(), SessionInsertError> {
    session.insert(RECENTLY_VIEWED_KEY, viewed)
}
