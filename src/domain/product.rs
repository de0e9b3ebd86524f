use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::pagination::Pagination;

/// Catalog item offered in the storefront.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Optional longer description shown on the detail page.
    pub description: Option<String>,
    /// Current unit price in cents.
    pub price_cents: i64,
    /// Units left for sale.
    pub stock: i32,
    /// Optional image URL, either uploaded or external.
    pub image: Option<String>,
    /// Category the product is filed under.
    pub category_id: Option<i32>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

impl Product {
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Availability label rendered on the product page.
    pub fn stock_status(&self) -> &'static str {
        if self.in_stock() {
            "In Stock"
        } else {
            "Out of Stock"
        }
    }
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock: i32,
    pub image: Option<String>,
    pub category_id: Option<i32>,
}

impl NewProduct {
    /// Build a new product payload with the mandatory fields.
    pub fn new(name: impl Into<String>, price_cents: i64, stock: i32) -> Self {
        Self {
            name: name.into(),
            description: None,
            price_cents,
            stock,
            image: None,
            category_id: None,
        }
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach an image URL to the product payload.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// File the product under a category.
    pub fn with_category_id(mut self, category_id: i32) -> Self {
        self.category_id = Some(category_id);
        self
    }
}

/// Full replacement of the editable product fields.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub stock: i32,
    pub image: Option<String>,
    pub category_id: Option<i32>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl UpdateProduct {
    /// Start an update from the current state of `product`.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price_cents: product.price_cents,
            stock: product.stock,
            image: product.image.clone(),
            category_id: product.category_id,
            updated_at: chrono::Local::now().naive_utc(),
        }
    }
}

/// Query definition used to list products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Optional case-insensitive substring matched against the product name.
    pub search: Option<String>,
    /// Optional exact category name filter.
    pub category: Option<String>,
    /// Optional exact subcategory filter.
    pub subcategory: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    /// Construct a query that targets every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter the results by a search term applied to the name.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Filter the results to products filed under categories with this name.
    pub fn category(mut self, name: impl Into<String>) -> Self {
        self.category = Some(name.into());
        self
    }

    /// Filter the results to products filed under categories with this subcategory.
    pub fn subcategory(mut self, subcategory: impl Into<String>) -> Self {
        self.subcategory = Some(subcategory.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
