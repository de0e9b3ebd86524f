use serde::Serialize;

/// Number of rows shown per page in paginated listings.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 20;

/// Page selector passed down to repository list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page number.
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Row offset for the requested page; pages below 1 are treated as the first page.
    pub fn offset(&self) -> i64 {
        ((self.page.max(1) - 1) * self.per_page) as i64
    }

    pub fn limit(&self) -> i64 {
        self.per_page as i64
    }
}

/// A page of items together with the information needed to render page links.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, total_pages: usize) -> Self {
        Self {
            items,
            page: page.max(1),
            total_pages,
        }
    }

    /// Build a page from the total row count reported by a list query.
    pub fn from_total(items: Vec<T>, page: usize, total: usize, per_page: usize) -> Self {
        Self::new(items, page, total.div_ceil(per_page.max(1)))
    }
}
