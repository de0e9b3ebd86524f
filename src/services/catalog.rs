use std::collections::{BTreeSet, HashMap};

use serde::Deserialize;

use crate::domain::category::Category;
use crate::domain::product::{Product, ProductListQuery};
use crate::domain::recently_viewed::RecentlyViewed;
use crate::domain::review::ReviewListQuery;
use crate::pagination::Paginated;
use crate::repository::{CategoryReader, ProductReader, ReviewReader, UserReader};
use crate::services::reviews::{ReviewView, with_authors};
use crate::services::{ServiceError, ServiceResult};

/// Products shown per storefront page.
pub const CATALOG_PAGE_SIZE: usize = 12;

/// Query parameters accepted by the storefront home page.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Case-insensitive substring matched against product names.
    pub q: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub page: Option<usize>,
}

/// Data required to render the storefront home page.
pub struct HomePageData {
    pub products: Paginated<Product>,
    /// Distinct category names for the filter controls.
    pub categories: Vec<String>,
    /// Distinct subcategory labels for the filter controls.
    pub subcategories: Vec<String>,
    pub q: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

/// Data required to render a product page.
pub struct ProductPageData {
    pub product: Product,
    pub category: Option<Category>,
    pub stock_status: &'static str,
    /// Approved reviews only.
    pub reviews: Vec<ReviewView>,
    /// Other products the visitor opened recently, most recent first.
    pub recently_viewed: Vec<Product>,
}

fn filter_value(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Loads the filtered, paginated product listing.
pub fn load_home_page<R>(repo: &R, query: CatalogQuery) -> ServiceResult<HomePageData>
where
    R: ProductReader + CategoryReader + ?Sized,
{
    let q = filter_value(query.q);
    let category = filter_value(query.category);
    let subcategory = filter_value(query.subcategory);
    let page = query.page.unwrap_or(1).max(1);

    let mut list_query = ProductListQuery::new().paginate(page, CATALOG_PAGE_SIZE);
    if let Some(term) = q.as_ref() {
        list_query = list_query.search(term);
    }
    if let Some(name) = category.as_ref() {
        list_query = list_query.category(name);
    }
    if let Some(label) = subcategory.as_ref() {
        list_query = list_query.subcategory(label);
    }

    let (total, products) = repo.list_products(list_query)?;

    let all_categories = repo.list_categories()?;
    let categories: BTreeSet<String> = all_categories
        .iter()
        .map(|category| category.name.clone())
        .collect();
    let subcategories: BTreeSet<String> = all_categories
        .into_iter()
        .filter_map(|category| category.subcategory)
        .filter(|label| !label.is_empty())
        .collect();

    Ok(HomePageData {
        products: Paginated::from_total(products, page, total, CATALOG_PAGE_SIZE),
        categories: categories.into_iter().collect(),
        subcategories: subcategories.into_iter().collect(),
        q,
        category,
        subcategory,
    })
}

/// Loads a product page and records the visit in `recently_viewed`.
pub fn load_product_page<R>(
    repo: &R,
    product_id: i32,
    recently_viewed: &mut RecentlyViewed,
) -> ServiceResult<ProductPageData>
where
    R: ProductReader + CategoryReader + ReviewReader + UserReader + ?Sized,
{
    let product = repo
        .get_product_by_id(product_id)?
        .ok_or(ServiceError::NotFound)?;

    let category = match product.category_id {
        Some(category_id) => repo.get_category_by_id(category_id)?,
        None => None,
    };

    let (_, reviews) = repo.list_reviews(
        ReviewListQuery::new()
            .product_id(product.id)
            .approved_only(),
    )?;
    let reviews = with_authors(repo, reviews)?;

    recently_viewed.push(product.id);
    let others: Vec<i32> = recently_viewed
        .ids()
        .iter()
        .copied()
        .filter(|id| *id != product.id)
        .collect();

    let mut found: HashMap<i32, Product> = repo
        .get_products_by_ids(&others)?
        .into_iter()
        .map(|product| (product.id, product))
        .collect();
    let recently_viewed = others.iter().filter_map(|id| found.remove(id)).collect();

    Ok(ProductPageData {
        stock_status: product.stock_status(),
        product,
        category,
        reviews,
        recently_viewed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::MockStore;
    use crate::services::test_support::{fixed_datetime, product};

    fn category(id: i32, name: &str, subcategory: Option<&str>) -> Category {
        Category {
            id,
            name: name.to_string(),
            subcategory: subcategory.map(str::to_string),
            created_at: fixed_datetime(),
        }
    }

    #[test]
    fn home_page_passes_filters_and_collects_distinct_labels() {
        let mut repo = MockStore::new();
        repo.expect_list_products()
            .withf(|query| {
                query.search.as_deref() == Some("mug")
                    && query.category.as_deref() == Some("Kitchen")
                    && query.subcategory.is_none()
                    && query.pagination.map(|p| p.page) == Some(2)
            })
            .returning(|_| Ok((13, vec![product(1, "Blue mug", 450, 2)])));
        repo.expect_list_categories().returning(|| {
            Ok(vec![
                category(1, "Kitchen", Some("Mugs")),
                category(2, "Kitchen", Some("Plates")),
                category(3, "Apparel", None),
            ])
        });

        let query = CatalogQuery {
            q: Some(" mug ".to_string()),
            category: Some("Kitchen".to_string()),
            subcategory: Some("  ".to_string()),
            page: Some(2),
        };
        let data = load_home_page(&repo, query).unwrap();

        assert_eq!(data.categories, vec!["Apparel", "Kitchen"]);
        assert_eq!(data.subcategories, vec!["Mugs", "Plates"]);
        assert_eq!(data.products.total_pages, 2);
        assert_eq!(data.q.as_deref(), Some("mug"));
    }

    #[test]
    fn product_page_records_visit_and_orders_recent_products() {
        let mut repo = MockStore::new();
        repo.expect_get_product_by_id()
            .returning(|id| Ok(Some(product(id, "Mug", 450, 0))));
        repo.expect_get_products_by_ids()
            .withf(|ids| ids == [2, 1])
            .returning(|_| Ok(vec![product(1, "Tee", 1200, 3), product(2, "Cap", 900, 1)]));
        repo.expect_list_reviews()
            .withf(|query| query.approved_only && query.product_id == Some(3))
            .returning(|_| Ok((0, Vec::new())));
        repo.expect_get_users_by_ids()
            .returning(|_| Ok(Vec::new()));

        let mut recently_viewed = RecentlyViewed::default();
        recently_viewed.push(1);
        recently_viewed.push(2);

        let data = load_product_page(&repo, 3, &mut recently_viewed).unwrap();

        assert_eq!(recently_viewed.ids(), &[3, 2, 1]);
        assert_eq!(data.stock_status, "Out of Stock");
        let names: Vec<&str> = data
            .recently_viewed
            .iter()
            .map(|product| product.name.as_str())
            .collect();
        assert_eq!(names, vec!["Cap", "Tee"]);
    }

    #[test]
    fn missing_product_is_not_found_and_not_recorded() {
        let mut repo = MockStore::new();
        repo.expect_get_product_by_id()
            .returning(|_| Ok(None));

        let mut recently_viewed = RecentlyViewed::default();
        let result = load_product_page(&repo, 3, &mut recently_viewed);

        assert!(matches!(result, Err(ServiceError::NotFound)));
        assert!(recently_viewed.is_empty());
    }
}
