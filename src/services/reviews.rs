use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::review::{Review, ReviewListQuery};
use crate::forms::reviews::ReviewForm;
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ProductReader, ReviewReader, ReviewWriter, UserReader};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

/// Review together with the names needed to render it.
#[derive(Debug, Serialize)]
pub struct ReviewView {
    #[serde(flatten)]
    pub review: Review,
    pub author: String,
    pub product_name: Option<String>,
}

/// Stores a customer review in the moderation queue.
pub fn submit_review<R>(
    repo: &R,
    user: &AuthenticatedUser,
    product_id: i32,
    form: ReviewForm,
) -> ServiceResult<Review>
where
    R: ProductReader + ReviewWriter + ?Sized,
{
    if repo.get_product_by_id(product_id)?.is_none() {
        return Err(ServiceError::NotFound);
    }

    let new_review = form
        .into_new_review(user.id, product_id)
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.create_review(&new_review).map_err(ServiceError::from)
}

/// Loads the review moderation page, pending reviews first.
pub fn load_reviews_page<R>(
    repo: &R,
    user: &AuthenticatedUser,
    page: Option<usize>,
) -> ServiceResult<Paginated<ReviewView>>
where
    R: ReviewReader + ProductReader + UserReader + ?Sized,
{
    ensure_admin(user)?;

    let page = page.unwrap_or(1);
    let (total, reviews) =
        repo.list_reviews(ReviewListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE))?;

    let product_ids: Vec<i32> = reviews
        .iter()
        .map(|review| review.product_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let product_names: HashMap<i32, String> = repo
        .get_products_by_ids(&product_ids)?
        .into_iter()
        .map(|product| (product.id, product.name))
        .collect();

    let mut views = with_authors(repo, reviews)?;
    for view in &mut views {
        view.product_name = product_names.get(&view.review.product_id).cloned();
    }

    Ok(Paginated::from_total(
        views,
        page,
        total,
        DEFAULT_ITEMS_PER_PAGE,
    ))
}

/// Makes a review visible on the storefront.
pub fn approve_review<R>(repo: &R, user: &AuthenticatedUser, review_id: i32) -> ServiceResult<Review>
where
    R: ReviewWriter + ?Sized,
{
    ensure_admin(user)?;
    repo.approve_review(review_id).map_err(ServiceError::from)
}

pub fn remove_review<R>(repo: &R, user: &AuthenticatedUser, review_id: i32) -> ServiceResult<()>
where
    R: ReviewWriter + ?Sized,
{
    ensure_admin(user)?;
    repo.delete_review(review_id).map_err(ServiceError::from)
}

/// Attach author usernames to reviews; deleted accounts show as "Anonymous".
pub(crate) fn with_authors<R>(repo: &R, reviews: Vec<Review>) -> ServiceResult<Vec<ReviewView>>
where
    R: UserReader + ?Sized,
{
    let user_ids: Vec<i32> = reviews
        .iter()
        .map(|review| review.user_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let authors: HashMap<i32, String> = repo
        .get_users_by_ids(&user_ids)?
        .into_iter()
        .map(|user| (user.id, user.username))
        .collect();

    Ok(reviews
        .into_iter()
        .map(|review| ReviewView {
            author: authors
                .get(&review.user_id)
                .cloned()
                .unwrap_or_else(|| "Anonymous".to_string()),
            product_name: None,
            review,
        })
        .collect())
}
