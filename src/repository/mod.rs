use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory, UpdateCategory};
use crate::domain::inquiry::{Inquiry, NewInquiry};
use crate::domain::order::{NewOrder, Order, OrderListQuery, OrderStatus};
use crate::domain::product::{NewProduct, Product, ProductListQuery, UpdateProduct};
use crate::domain::report::{CategoryShare, MonthlySales, StoreTotals, TopProduct};
use crate::domain::review::{NewReview, Review, ReviewListQuery};
use crate::domain::user::{NewUser, UpdateUser, User, UserListQuery};
use crate::pagination::Pagination;
use crate::repository::errors::RepositoryResult;

pub mod category;
pub mod errors;
pub mod inquiry;
pub mod order;
pub mod product;
pub mod report;
pub mod review;
pub mod user;

#[cfg(test)]
pub mod mock;

#[derive(Clone)]
/// Diesel-backed repository implementation that wraps an r2d2 pool.
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository using the provided connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations over user accounts.
pub trait UserReader {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<User>>;
    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<User>>;
    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<User>>;
    fn get_users_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<User>>;
    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<User>)>;
}

/// Write operations over user accounts.
pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    fn update_user(&self, user_id: i32, updates: &UpdateUser) -> RepositoryResult<User>;
}

pub trait CategoryReader {
    fn get_category_by_id(&self, id: i32) -> RepositoryResult<Option<Category>>;
    /// All categories ordered by name then subcategory.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
}

pub trait CategoryWriter {
    fn create_category(&self, new_category: &NewCategory) -> RepositoryResult<Category>;
    fn update_category(
        &self,
        category_id: i32,
        updates: &UpdateCategory,
    ) -> RepositoryResult<Category>;
    /// Products filed under the category keep existing with no category.
    fn delete_category(&self, category_id: i32) -> RepositoryResult<()>;
}

/// Read-only operations over the catalog.
pub trait ProductReader {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
    /// Products for the given ids. Missing ids are skipped silently.
    fn get_products_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

/// Write operations over the catalog.
pub trait ProductWriter {
    fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
    fn update_product(&self, product_id: i32, updates: &UpdateProduct)
    -> RepositoryResult<Product>;
    fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
}

pub trait OrderReader {
    fn get_order_by_id(&self, id: i32) -> RepositoryResult<Option<Order>>;
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<Order>)>;
}

pub trait OrderWriter {
    /// Persist the order and decrement stock for every line in a single
    /// immediate transaction. Fails with `InsufficientStock` and leaves the
    /// database untouched when any line cannot be fulfilled.
    fn place_order(&self, new_order: &NewOrder) -> RepositoryResult<Order>;
    fn update_order_status(&self, order_id: i32, status: OrderStatus) -> RepositoryResult<Order>;
}

pub trait InquiryReader {
    /// Newest first.
    fn list_inquiries(&self, pagination: Pagination) -> RepositoryResult<(usize, Vec<Inquiry>)>;
}

pub trait InquiryWriter {
    fn create_inquiry(&self, new_inquiry: &NewInquiry) -> RepositoryResult<Inquiry>;
}

pub trait ReviewReader {
    fn list_reviews(&self, query: ReviewListQuery) -> RepositoryResult<(usize, Vec<Review>)>;
}

pub trait ReviewWriter {
    fn create_review(&self, new_review: &NewReview) -> RepositoryResult<Review>;
    fn approve_review(&self, review_id: i32) -> RepositoryResult<Review>;
    fn delete_review(&self, review_id: i32) -> RepositoryResult<()>;
}

/// Aggregates backing the admin dashboard and reports page.
pub trait ReportReader {
    fn store_totals(&self) -> RepositoryResult<StoreTotals>;
    fn top_products(&self, limit: i64) -> RepositoryResult<Vec<TopProduct>>;
    fn monthly_sales(&self) -> RepositoryResult<Vec<MonthlySales>>;
    fn category_distribution(&self) -> RepositoryResult<Vec<CategoryShare>>;
}
