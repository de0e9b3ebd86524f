use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::order::{
    NewOrder as DomainNewOrder, NewOrderItem as DomainNewOrderItem, Order as DomainOrder,
    OrderItem as DomainOrderItem, OrderStatus,
};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::orders)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub status: String,
    pub total_cents: i64,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(table_name = crate::schema::order_items)]
#[diesel(belongs_to(Order, foreign_key = order_id))]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub product_id: Option<i32>,
    pub product_name: String,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
pub struct NewOrder<'a> {
    pub user_id: i32,
    pub status: &'a str,
    pub total_cents: i64,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::order_items)]
pub struct NewOrderItem<'a> {
    pub order_id: i32,
    pub product_id: Option<i32>,
    pub product_name: &'a str,
    pub quantity: i32,
    pub unit_price_cents: i64,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::orders)]
pub struct UpdateOrderStatus<'a> {
    pub status: &'a str,
    pub updated_at: NaiveDateTime,
}

impl Order {
    pub fn into_domain(self, items: Vec<OrderItem>) -> DomainOrder {
        let status = self.status.parse::<OrderStatus>().unwrap_or_else(|err| {
            log::warn!("Order {} has {err}; treating it as PLACED", self.id);
            OrderStatus::default()
        });

        DomainOrder {
            id: self.id,
            user_id: self.user_id,
            status,
            total_cents: self.total_cents,
            items: items.into_iter().map(OrderItem::into_domain).collect(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl OrderItem {
    pub fn into_domain(self) -> DomainOrderItem {
        DomainOrderItem {
            id: self.id,
            product_id: self.product_id,
            product_name: self.product_name,
            quantity: self.quantity,
            unit_price_cents: self.unit_price_cents,
        }
    }
}

impl From<(Order, Vec<OrderItem>)> for DomainOrder {
    fn from(value: (Order, Vec<OrderItem>)) -> Self {
        value.0.into_domain(value.1)
    }
}

impl<'a> From<&'a DomainNewOrder> for NewOrder<'a> {
    fn from(value: &'a DomainNewOrder) -> Self {
        Self {
            user_id: value.user_id,
            status: value.status.into(),
            total_cents: value.total_cents,
        }
    }
}

impl<'a> NewOrderItem<'a> {
    pub fn from_domain(order_id: i32, value: &'a DomainNewOrderItem) -> Self {
        Self {
            order_id,
            product_id: Some(value.product_id),
            product_name: value.product_name.as_str(),
            quantity: value.quantity,
            unit_price_cents: value.unit_price_cents,
        }
    }
}

impl UpdateOrderStatus<'static> {
    pub fn new(status: OrderStatus) -> Self {
        Self {
            status: status.as_str(),
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}
