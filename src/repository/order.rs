use std::collections::HashMap;

use chrono::Local;
use diesel::prelude::*;
use diesel::sqlite::{Sqlite, SqliteConnection};

use crate::{
    domain::order::{NewOrder as DomainNewOrder, Order as DomainOrder, OrderListQuery, OrderStatus},
    models::order::{
        NewOrder as DbNewOrder, NewOrderItem as DbNewOrderItem, Order as DbOrder,
        OrderItem as DbOrderItem, UpdateOrderStatus,
    },
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, OrderReader, OrderWriter},
    schema::{order_items, orders, products},
};

fn load_items(conn: &mut SqliteConnection, order_id: i32) -> RepositoryResult<Vec<DbOrderItem>> {
    Ok(order_items::table
        .filter(order_items::order_id.eq(order_id))
        .order(order_items::id.asc())
        .load::<DbOrderItem>(conn)?)
}

fn filtered_orders(query: &OrderListQuery) -> orders::BoxedQuery<'static, Sqlite> {
    let mut items = orders::table.into_boxed::<Sqlite>();

    if let Some(user_id) = query.user_id {
        items = items.filter(orders::user_id.eq(user_id));
    }

    if let Some(status) = query.status {
        items = items.filter(orders::status.eq(status.as_str()));
    }

    items
}

impl OrderReader for DieselRepository {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<DomainOrder>> {
        let mut conn = self.conn()?;
        let order = orders::table
            .filter(orders::id.eq(id))
            .first::<DbOrder>(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = load_items(&mut conn, order.id)?;

        Ok(Some(DomainOrder::from((order, items))))
    }

    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<DomainOrder>)> {
        let mut conn = self.conn()?;

        let total = filtered_orders(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered_orders(&query)
            .order(orders::created_at.desc())
            .then_order_by(orders::id.desc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_orders = items.load::<DbOrder>(&mut conn)?;
        if db_orders.is_empty() {
            return Ok((total, Vec::new()));
        }

        let order_ids: Vec<i32> = db_orders.iter().map(|order| order.id).collect();

        let mut items_by_order: HashMap<i32, Vec<DbOrderItem>> = HashMap::new();
        let rows = order_items::table
            .filter(order_items::order_id.eq_any(&order_ids))
            .order(order_items::id.asc())
            .load::<DbOrderItem>(&mut conn)?;

        for item in rows {
            items_by_order.entry(item.order_id).or_default().push(item);
        }

        let orders = db_orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                DomainOrder::from((order, items))
            })
            .collect();

        Ok((total, orders))
    }
}

impl OrderWriter for DieselRepository {
    fn place_order(&self, new_order: &DomainNewOrder) -> RepositoryResult<DomainOrder> {
        let mut conn = self.conn()?;

        // BEGIN IMMEDIATE takes the write lock up front so two checkouts
        // cannot both read the same stock level.
        conn.immediate_transaction::<DomainOrder, RepositoryError, _>(|conn| {
            let now = Local::now().naive_utc();

            for item in &new_order.items {
                let decremented = diesel::update(
                    products::table
                        .filter(products::id.eq(item.product_id))
                        .filter(products::stock.ge(item.quantity)),
                )
                .set((
                    products::stock.eq(products::stock - item.quantity),
                    products::updated_at.eq(now),
                ))
                .execute(conn)?;

                if decremented == 0 {
                    return Err(RepositoryError::InsufficientStock {
                        product_id: item.product_id,
                    });
                }
            }

            let created = diesel::insert_into(orders::table)
                .values(&DbNewOrder::from(new_order))
                .get_result::<DbOrder>(conn)?;

            let payload: Vec<DbNewOrderItem> = new_order
                .items
                .iter()
                .map(|item| DbNewOrderItem::from_domain(created.id, item))
                .collect();

            diesel::insert_into(order_items::table)
                .values(&payload)
                .execute(conn)?;

            let items = load_items(conn, created.id)?;

            log::info!(
                "Order #{} placed by user {} for {} cents",
                created.id,
                created.user_id,
                created.total_cents
            );

            Ok(DomainOrder::from((created, items)))
        })
    }

    fn update_order_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> RepositoryResult<DomainOrder> {
        let mut conn = self.conn()?;

        let updated = diesel::update(orders::table.filter(orders::id.eq(order_id)))
            .set(&UpdateOrderStatus::new(status))
            .get_result::<DbOrder>(&mut conn)?;

        let items = load_items(&mut conn, updated.id)?;

        Ok(DomainOrder::from((updated, items)))
    }
}
