use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer, Nullable, Text};

use crate::domain::report::{CategoryShare, MonthlySales, StoreTotals, TopProduct};

/// Row produced by the store-wide counters query.
#[derive(Debug, QueryableByName)]
pub struct StoreTotalsRow {
    #[diesel(sql_type = BigInt)]
    pub users: i64,
    #[diesel(sql_type = BigInt)]
    pub products: i64,
    #[diesel(sql_type = BigInt)]
    pub orders: i64,
    #[diesel(sql_type = BigInt)]
    pub inquiries: i64,
    #[diesel(sql_type = BigInt)]
    pub reviews: i64,
    #[diesel(sql_type = BigInt)]
    pub revenue_cents: i64,
}

/// Row produced by the top-selling products aggregate.
#[derive(Debug, QueryableByName)]
pub struct TopProductRow {
    #[diesel(sql_type = Nullable<Integer>)]
    pub product_id: Option<i32>,
    #[diesel(sql_type = Text)]
    pub name: String,
    #[diesel(sql_type = BigInt)]
    pub quantity: i64,
    #[diesel(sql_type = BigInt)]
    pub revenue_cents: i64,
}

/// Row produced by the monthly sales aggregate.
#[derive(Debug, QueryableByName)]
pub struct MonthlySalesRow {
    #[diesel(sql_type = Text)]
    pub month: String,
    #[diesel(sql_type = BigInt)]
    pub total_cents: i64,
}

/// Row produced by the category distribution aggregate.
#[derive(Debug, QueryableByName)]
pub struct CategoryShareRow {
    #[diesel(sql_type = Text)]
    pub category: String,
    #[diesel(sql_type = BigInt)]
    pub products: i64,
}

impl From<TopProductRow> for TopProduct {
    fn from(value: TopProductRow) -> Self {
        Self {
            product_id: value.product_id,
            name: value.name,
            quantity: value.quantity,
            revenue_cents: value.revenue_cents,
        }
    }
}

impl From<MonthlySalesRow> for MonthlySales {
    fn from(value: MonthlySalesRow) -> Self {
        Self {
            month: value.month,
            total_cents: value.total_cents,
        }
    }
}

impl From<CategoryShareRow> for CategoryShare {
    fn from(value: CategoryShareRow) -> Self {
        Self {
            category: value.category,
            products: value.products,
        }
    }
}

impl From<StoreTotalsRow> for StoreTotals {
    fn from(value: StoreTotalsRow) -> Self {
        Self {
            users: value.users,
            products: value.products,
            orders: value.orders,
            inquiries: value.inquiries,
            reviews: value.reviews,
            revenue_cents: value.revenue_cents,
        }
    }
}
