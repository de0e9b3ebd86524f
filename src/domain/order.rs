use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Lifecycle states of a customer order.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order has been created at checkout.
    #[default]
    Placed,
    /// Payment has been received.
    Paid,
    /// Order has left the warehouse.
    Shipped,
    /// Order has reached the customer.
    Delivered,
    /// Order has been cancelled and should not be processed further.
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Placed,
        OrderStatus::Paid,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "PLACED",
            OrderStatus::Paid => "PAID",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<OrderStatus> for &'static str {
    fn from(value: OrderStatus) -> Self {
        value.as_str()
    }
}

/// Returned when a string does not name a known order status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status `{0}`")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownOrderStatus(value.to_string()))
    }
}

/// Committed purchase together with its line items.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Order {
    pub id: i32,
    /// Account that placed the order.
    pub user_id: i32,
    pub status: OrderStatus,
    /// Sum of `unit_price_cents * quantity` over the items.
    pub total_cents: i64,
    pub items: Vec<OrderItem>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Order {
    /// Number of units across all lines.
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|item| i64::from(item.quantity)).sum()
    }
}

/// Snapshot of a purchased product taken at checkout time.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub id: i32,
    /// `None` once the product has been removed from the catalog.
    pub product_id: Option<i32>,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

impl OrderItem {
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents
            .saturating_mul(i64::from(self.quantity))
    }
}

/// Line item payload written at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

impl NewOrderItem {
    pub fn new(
        product_id: i32,
        product_name: impl Into<String>,
        quantity: i32,
        unit_price_cents: i64,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            quantity,
            unit_price_cents,
        }
    }

    /// `None` when the product does not fit in an `i64`.
    pub fn line_total_cents(&self) -> Option<i64> {
        self.unit_price_cents.checked_mul(i64::from(self.quantity))
    }
}

/// Payload required to place an order. The total is always derived from the items.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub user_id: i32,
    pub status: OrderStatus,
    pub total_cents: i64,
    pub items: Vec<NewOrderItem>,
}

impl NewOrder {
    /// Build an order in the `PLACED` state for `user_id` from the given lines.
    /// Returns `None` when the total overflows.
    pub fn new(user_id: i32, items: Vec<NewOrderItem>) -> Option<Self> {
        let total_cents = items.iter().try_fold(0i64, |total, item| {
            total.checked_add(item.line_total_cents()?)
        })?;
        Some(Self {
            user_id,
            status: OrderStatus::default(),
            total_cents,
            items,
        })
    }
}

/// Query definition used to list orders.
#[derive(Debug, Clone, Default)]
pub struct OrderListQuery {
    /// Restrict to orders placed by this account.
    pub user_id: Option<i32>,
    /// Optional status filter.
    pub status: Option<OrderStatus>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl OrderListQuery {
    /// Construct a query that targets every order, newest first.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by the account that placed them.
    pub fn user_id(mut self, user_id: i32) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Filter the results by the provided status.
    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_order_total_is_sum_of_lines() {
        let order = NewOrder::new(
            7,
            vec![
                NewOrderItem::new(1, "Ring", 2, 1250),
                NewOrderItem::new(2, "Chain", 1, 4999),
            ],
        )
        .unwrap();

        assert_eq!(order.total_cents, 2 * 1250 + 4999);
        assert_eq!(order.status, OrderStatus::Placed);
    }

    #[test]
    fn new_order_rejects_overflowing_totals() {
        let huge_line = NewOrderItem::new(1, "Ring", 100, i64::MAX / 10);
        assert_eq!(huge_line.line_total_cents(), None);
        assert!(NewOrder::new(7, vec![huge_line]).is_none());

        let half = i64::MAX / 2 + 1;
        let lines = vec![
            NewOrderItem::new(1, "Ring", 1, half),
            NewOrderItem::new(2, "Chain", 1, half),
        ];
        assert!(NewOrder::new(7, lines).is_none());
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("shipped".parse::<OrderStatus>(), Ok(OrderStatus::Shipped));
        assert_eq!(" PAID ".parse::<OrderStatus>(), Ok(OrderStatus::Paid));
        assert!("LOST".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn status_serializes_as_uppercase() {
        let value = serde_json::to_value(OrderStatus::Cancelled).unwrap_or_default();
        assert_eq!(value, serde_json::json!("CANCELLED"));
    }
}
