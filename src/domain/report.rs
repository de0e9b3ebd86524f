use serde::Serialize;

/// Headline counters shown on the dashboard and the reports page.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct StoreTotals {
    pub users: i64,
    pub products: i64,
    pub orders: i64,
    pub inquiries: i64,
    pub reviews: i64,
    /// Sum of all order totals in cents.
    pub revenue_cents: i64,
}

/// Best-selling product row.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TopProduct {
    /// `None` when the product has since been deleted.
    pub product_id: Option<i32>,
    pub name: String,
    pub quantity: i64,
    /// Sum of `quantity * unit_price_cents` over the sold lines.
    pub revenue_cents: i64,
}

/// Revenue booked in one calendar month.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MonthlySales {
    /// `YYYY-MM`.
    pub month: String,
    pub total_cents: i64,
}

/// Number of products filed under a category.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryShare {
    pub category: String,
    pub products: i64,
}
