use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::BigInt;

use crate::{
    domain::report::{CategoryShare, MonthlySales, StoreTotals, TopProduct},
    models::report::{CategoryShareRow, MonthlySalesRow, StoreTotalsRow, TopProductRow},
    repository::errors::RepositoryResult,
    repository::{DieselRepository, ReportReader},
};

const STORE_TOTALS_SQL: &str = "\
SELECT
    (SELECT COUNT(*) FROM users) AS users,
    (SELECT COUNT(*) FROM products) AS products,
    (SELECT COUNT(*) FROM orders) AS orders,
    (SELECT COUNT(*) FROM inquiries) AS inquiries,
    (SELECT COUNT(*) FROM reviews) AS reviews,
    (SELECT COALESCE(SUM(total_cents), 0) FROM orders) AS revenue_cents";

// Lines whose product was deleted are grouped by their snapshotted name.
const TOP_PRODUCTS_SQL: &str = "\
SELECT
    oi.product_id AS product_id,
    MAX(oi.product_name) AS name,
    SUM(oi.quantity) AS quantity,
    SUM(oi.quantity * oi.unit_price_cents) AS revenue_cents
FROM order_items oi
GROUP BY oi.product_id, CASE WHEN oi.product_id IS NULL THEN oi.product_name END
ORDER BY quantity DESC, name ASC
LIMIT ?";

const MONTHLY_SALES_SQL: &str = "\
SELECT
    strftime('%Y-%m', created_at) AS month,
    COALESCE(SUM(total_cents), 0) AS total_cents
FROM orders
GROUP BY month
ORDER BY month ASC";

const CATEGORY_DISTRIBUTION_SQL: &str = "\
SELECT
    c.name || COALESCE(' / ' || c.subcategory, '') AS category,
    COUNT(p.id) AS products
FROM categories c
LEFT JOIN products p ON p.category_id = c.id
GROUP BY c.id
ORDER BY c.name ASC, c.subcategory ASC";

impl ReportReader for DieselRepository {
    fn store_totals(&self) -> RepositoryResult<StoreTotals> {
        let mut conn = self.conn()?;
        let row = sql_query(STORE_TOTALS_SQL).get_result::<StoreTotalsRow>(&mut conn)?;
        Ok(row.into())
    }

    fn top_products(&self, limit: i64) -> RepositoryResult<Vec<TopProduct>> {
        let mut conn = self.conn()?;
        let rows = sql_query(TOP_PRODUCTS_SQL)
            .bind::<BigInt, _>(limit.max(0))
            .load::<TopProductRow>(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn monthly_sales(&self) -> RepositoryResult<Vec<MonthlySales>> {
        let mut conn = self.conn()?;
        let rows = sql_query(MONTHLY_SALES_SQL).load::<MonthlySalesRow>(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    fn category_distribution(&self) -> RepositoryResult<Vec<CategoryShare>> {
        let mut conn = self.conn()?;
        let rows = sql_query(CATEGORY_DISTRIBUTION_SQL).load::<CategoryShareRow>(&mut conn)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }
}
