use crate::domain::auth::AuthenticatedUser;
use crate::domain::order::{Order, OrderListQuery};
use crate::domain::report::{CategoryShare, MonthlySales, StoreTotals, TopProduct};
use crate::repository::{OrderReader, ReportReader};
use crate::services::{ServiceResult, ensure_admin};

/// Number of best sellers and recent orders shown on the reports page.
pub const REPORT_LIST_LEN: usize = 5;

pub struct ReportsPageData {
    pub totals: StoreTotals,
    pub top_products: Vec<TopProduct>,
    pub recent_orders: Vec<Order>,
    pub monthly_sales: Vec<MonthlySales>,
    pub categories: Vec<CategoryShare>,
}

/// Aggregates for the reports page, computed on every request.
pub fn load_reports<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ReportsPageData>
where
    R: ReportReader + OrderReader + ?Sized,
{
    ensure_admin(user)?;

    let totals = repo.store_totals()?;
    let top_products = repo.top_products(REPORT_LIST_LEN as i64)?;
    let (_, recent_orders) =
        repo.list_orders(OrderListQuery::new().paginate(1, REPORT_LIST_LEN))?;
    let monthly_sales = repo.monthly_sales()?;
    let categories = repo.category_distribution()?;

    Ok(ReportsPageData {
        totals,
        top_products,
        recent_orders,
        monthly_sales,
        categories,
    })
}
