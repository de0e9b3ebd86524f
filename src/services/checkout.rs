use crate::domain::auth::AuthenticatedUser;
use crate::domain::cart::Cart;
use crate::domain::order::{NewOrder, NewOrderItem, Order};
use crate::repository::errors::RepositoryError;
use crate::repository::{OrderWriter, ProductReader};
use crate::services::cart::{CART_TOTAL_TOO_LARGE, load_cart};
use crate::services::{ServiceError, ServiceResult};

/// Turns the session cart into a persisted order.
///
/// Every line is checked against current stock before anything is written.
/// The repository repeats the check atomically while decrementing stock, so a
/// concurrent checkout cannot oversell. The cart is emptied only on success.
pub fn checkout<R>(repo: &R, user: &AuthenticatedUser, cart: &mut Cart) -> ServiceResult<Order>
where
    R: ProductReader + OrderWriter + ?Sized,
{
    let summary = load_cart(repo, cart)?;
    if summary.is_empty() {
        return Err(ServiceError::EmptyCart);
    }

    if let Some(line) = summary
        .lines
        .iter()
        .find(|line| line.quantity > line.product.stock)
    {
        return Err(ServiceError::InsufficientStock {
            name: line.product.name.clone(),
        });
    }

    let items = summary
        .lines
        .iter()
        .map(|line| {
            NewOrderItem::new(
                line.product.id,
                line.product.name.clone(),
                line.quantity,
                line.product.price_cents,
            )
        })
        .collect();
    let new_order = NewOrder::new(user.id, items)
        .ok_or_else(|| ServiceError::Form(CART_TOTAL_TOO_LARGE.to_string()))?;

    match repo.place_order(&new_order) {
        Ok(order) => {
            cart.clear();
            Ok(order)
        }
        Err(RepositoryError::InsufficientStock { product_id }) => {
            let name = summary
                .lines
                .iter()
                .find(|line| line.product.id == product_id)
                .map(|line| line.product.name.clone())
                .unwrap_or_else(|| format!("product #{product_id}"));
            log::warn!("Checkout for user {} lost a stock race on {name}", user.id);
            Err(ServiceError::InsufficientStock { name })
        }
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{OrderItem, OrderStatus};
    use crate::domain::product::Product;
    use crate::repository::mock::MockStore;
    use crate::services::test_support::{customer, fixed_datetime, product};

    fn repo_with_products(products: Vec<Product>) -> MockStore {
        let mut repo = MockStore::new();
        repo.expect_get_products_by_ids()
            .returning(move |_| Ok(products.clone()));
        repo
    }

    fn order_from(new_order: &NewOrder) -> Order {
        Order {
            id: 31,
            user_id: new_order.user_id,
            status: new_order.status,
            total_cents: new_order.total_cents,
            items: new_order
                .items
                .iter()
                .enumerate()
                .map(|(index, item)| OrderItem {
                    id: index as i32 + 1,
                    product_id: Some(item.product_id),
                    product_name: item.product_name.clone(),
                    quantity: item.quantity,
                    unit_price_cents: item.unit_price_cents,
                })
                .collect(),
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    #[test]
    fn empty_cart_is_rejected() {
        let repo = repo_with_products(Vec::new());
        let mut cart = Cart::new();

        let result = checkout(&repo, &customer(), &mut cart);

        assert!(matches!(result, Err(ServiceError::EmptyCart)));
    }

    #[test]
    fn cart_of_deleted_products_counts_as_empty() {
        let repo = repo_with_products(Vec::new());
        let mut cart = Cart::new();
        cart.add(5, 1);

        let result = checkout(&repo, &customer(), &mut cart);

        assert!(matches!(result, Err(ServiceError::EmptyCart)));
    }

    #[test]
    fn insufficient_stock_writes_nothing_and_keeps_cart() {
        let mut repo = repo_with_products(vec![
            product(1, "Mug", 450, 10),
            product(2, "Tee", 1200, 1),
        ]);
        repo.expect_place_order().never();

        let mut cart = Cart::new();
        cart.add(1, 2);
        cart.add(2, 2);

        let result = checkout(&repo, &customer(), &mut cart);

        assert!(matches!(
            result,
            Err(ServiceError::InsufficientStock { name }) if name == "Tee"
        ));
        assert_eq!(cart.total_quantity(), 4);
    }

    #[test]
    fn overflowing_total_writes_nothing_and_keeps_cart() {
        let mut repo = repo_with_products(vec![product(1, "Vault", i64::MAX / 10, 1000)]);
        repo.expect_place_order().never();

        let mut cart = Cart::new();
        cart.add(1, 100);

        let result = checkout(&repo, &customer(), &mut cart);

        assert!(matches!(result, Err(ServiceError::Form(_))));
        assert_eq!(cart.total_quantity(), 100);
    }

    #[test]
    fn successful_checkout_totals_items_and_clears_cart() {
        let mut repo = repo_with_products(vec![
            product(1, "Mug", 450, 10),
            product(2, "Tee", 1200, 3),
        ]);
        repo.expect_place_order()
            .times(1)
            .withf(|new_order| {
                new_order.user_id == 7
                    && new_order.status == OrderStatus::Placed
                    && new_order.total_cents == 2 * 450 + 3 * 1200
                    && new_order.items.len() == 2
            })
            .returning(|new_order| Ok(order_from(new_order)));

        let mut cart = Cart::new();
        cart.add(1, 2);
        cart.add(2, 3);

        let order = checkout(&repo, &customer(), &mut cart).unwrap();

        assert_eq!(order.id, 31);
        assert_eq!(
            order.total_cents,
            order.items.iter().map(OrderItem::line_total_cents).sum::<i64>()
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn lost_stock_race_maps_to_product_name() {
        let mut repo = repo_with_products(vec![product(1, "Mug", 450, 10)]);
        repo.expect_place_order()
            .returning(|_| Err(RepositoryError::InsufficientStock { product_id: 1 }));

        let mut cart = Cart::new();
        cart.add(1, 2);

        let result = checkout(&repo, &customer(), &mut cart);

        assert!(matches!(
            result,
            Err(ServiceError::InsufficientStock { name }) if name == "Mug"
        ));
        assert!(!cart.is_empty());
    }
}
