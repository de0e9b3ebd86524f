use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Lowest accepted star rating.
pub const MIN_RATING: i32 = 1;
/// Highest accepted star rating.
pub const MAX_RATING: i32 = 5;

/// Product review left by a customer. Only approved reviews are public.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Review {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub content: String,
    pub rating: i32,
    pub approved: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewReview {
    pub user_id: i32,
    pub product_id: i32,
    pub content: String,
    pub rating: i32,
}

impl NewReview {
    pub fn new(user_id: i32, product_id: i32, content: impl Into<String>, rating: i32) -> Self {
        Self {
            user_id,
            product_id,
            content: content.into(),
            rating,
        }
    }
}

/// Query definition used to list reviews.
#[derive(Debug, Clone, Default)]
pub struct ReviewListQuery {
    pub product_id: Option<i32>,
    /// Restrict to reviews visible on the storefront.
    pub approved_only: bool,
    pub pagination: Option<Pagination>,
}

impl ReviewListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn product_id(mut self, product_id: i32) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn approved_only(mut self) -> Self {
        self.approved_only = true;
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
