use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::order::{Order, OrderListQuery, OrderStatus};
use crate::domain::user::User;
use crate::forms::orders::OrderStatusForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{OrderReader, OrderWriter, UserReader};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

pub const INVALID_STATUS: &str = "Invalid status.";

/// Orders placed by the current user, newest first.
pub fn load_my_orders<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<Order>>
where
    R: OrderReader + ?Sized,
{
    let (_, orders) = repo.list_orders(OrderListQuery::new().user_id(user.id))?;
    Ok(orders)
}

/// One of the current user's orders. Orders of other accounts are reported as missing.
pub fn load_my_order<R>(repo: &R, user: &AuthenticatedUser, order_id: i32) -> ServiceResult<Order>
where
    R: OrderReader + ?Sized,
{
    repo.get_order_by_id(order_id)?
        .filter(|order| order.user_id == user.id)
        .ok_or(ServiceError::NotFound)
}

/// Query parameters accepted by the admin orders page.
#[derive(Debug, Default, Deserialize)]
pub struct AdminOrdersQuery {
    pub status: Option<String>,
    pub page: Option<usize>,
}

/// Order row on the admin list, with the customer's name.
#[derive(Debug, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub customer: Option<String>,
    pub item_count: i64,
}

pub struct AdminOrdersPageData {
    pub orders: Paginated<OrderView>,
    pub status: Option<OrderStatus>,
}

/// Loads the admin orders page with an optional status filter.
pub fn load_orders_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    query: AdminOrdersQuery,
) -> ServiceResult<AdminOrdersPageData>
where
    R: OrderReader + UserReader + ?Sized,
{
    ensure_admin(user)?;

    let status = query
        .status
        .as_deref()
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| match value.parse::<OrderStatus>() {
            Ok(status) => Some(status),
            Err(err) => {
                log::warn!("Ignoring order filter: {err}");
                None
            }
        });

    let page = query.page.unwrap_or(1).max(1);
    let mut list_query = OrderListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(status) = status {
        list_query = list_query.status(status);
    }

    let (total, orders) = repo.list_orders(list_query)?;
    let views = with_customers(repo, orders)?;

    Ok(AdminOrdersPageData {
        orders: Paginated::from_total(views, page, total, DEFAULT_ITEMS_PER_PAGE),
        status,
    })
}

pub struct AdminOrderDetail {
    pub order: Order,
    pub customer: Option<User>,
}

pub fn load_order_detail<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: i32,
) -> ServiceResult<AdminOrderDetail>
where
    R: OrderReader + UserReader + ?Sized,
{
    ensure_admin(user)?;

    let order = repo
        .get_order_by_id(order_id)?
        .ok_or(ServiceError::NotFound)?;
    let customer = repo.get_user_by_id(order.user_id)?;

    Ok(AdminOrderDetail { order, customer })
}

/// Moves an order to another status. Unknown statuses are rejected.
pub fn change_order_status<R>(
    repo: &R,
    user: &AuthenticatedUser,
    order_id: i32,
    form: &OrderStatusForm,
) -> ServiceResult<Order>
where
    R: OrderWriter + ?Sized,
{
    ensure_admin(user)?;

    let status = form.status().map_err(|err| {
        log::warn!("Rejected status change for order {order_id}: {err}");
        ServiceError::Form(INVALID_STATUS.to_string())
    })?;

    let order = repo.update_order_status(order_id, status)?;
    log::info!("Order #{order_id} moved to {status} by user {}", user.id);
    Ok(order)
}

/// Attach customer usernames to orders.
pub(crate) fn with_customers<R>(repo: &R, orders: Vec<Order>) -> ServiceResult<Vec<OrderView>>
where
    R: UserReader + ?Sized,
{
    let user_ids: Vec<i32> = orders
        .iter()
        .map(|order| order.user_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let customers: HashMap<i32, String> = repo
        .get_users_by_ids(&user_ids)?
        .into_iter()
        .map(|user| (user.id, user.username))
        .collect();

    Ok(orders
        .into_iter()
        .map(|order| OrderView {
            customer: customers.get(&order.user_id).cloned(),
            item_count: order.item_count(),
            order,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::{MockOrderReader, MockOrderWriter, MockStore};
    use crate::services::test_support::{admin, customer, fixed_datetime};

    fn sample_order(id: i32, user_id: i32) -> Order {
        Order {
            id,
            user_id,
            status: OrderStatus::Placed,
            total_cents: 900,
            items: Vec::new(),
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    #[test]
    fn my_order_of_another_user_is_not_found() {
        let mut repo = MockOrderReader::new();
        repo.expect_get_order_by_id()
            .returning(|id| Ok(Some(sample_order(id, 99))));

        let result = load_my_order(&repo, &customer(), 4);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn my_orders_are_filtered_by_user() {
        let mut repo = MockOrderReader::new();
        repo.expect_list_orders()
            .withf(|query| query.user_id == Some(7) && query.pagination.is_none())
            .returning(|_| Ok((1, vec![sample_order(1, 7)])));

        let orders = load_my_orders(&repo, &customer()).unwrap();

        assert_eq!(orders.len(), 1);
    }

    #[test]
    fn admin_orders_page_requires_admin() {
        let repo = MockStore::new();

        let result = load_orders_page(&repo, &customer(), AdminOrdersQuery::default());

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn admin_orders_page_applies_status_filter_and_names_customers() {
        let mut repo = MockStore::new();
        repo.expect_list_orders()
            .withf(|query| query.status == Some(OrderStatus::Shipped))
            .returning(|_| Ok((1, vec![sample_order(1, 7)])));
        repo.expect_get_users_by_ids().returning(|_| {
            Ok(vec![User {
                id: 7,
                username: "jane".to_string(),
                email: "jane@example.com".to_string(),
                password_hash: String::new(),
                is_admin: false,
                created_at: fixed_datetime(),
            }])
        });

        let query = AdminOrdersQuery {
            status: Some("shipped".to_string()),
            page: None,
        };
        let data = load_orders_page(&repo, &admin(), query).unwrap();

        assert_eq!(data.status, Some(OrderStatus::Shipped));
        assert_eq!(data.orders.items[0].customer.as_deref(), Some("jane"));
    }

    #[test]
    fn unknown_status_is_rejected_without_writing() {
        let mut repo = MockOrderWriter::new();
        repo.expect_update_order_status().never();

        let form = OrderStatusForm {
            status: "LOST".to_string(),
        };
        let result = change_order_status(&repo, &admin(), 1, &form);

        assert!(matches!(result, Err(ServiceError::Form(message)) if message == INVALID_STATUS));
    }

    #[test]
    fn status_change_requires_admin() {
        let mut repo = MockOrderWriter::new();
        repo.expect_update_order_status().never();

        let form = OrderStatusForm {
            status: "PAID".to_string(),
        };
        let result = change_order_status(&repo, &customer(), 1, &form);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }
}
