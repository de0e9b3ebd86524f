use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::review::{NewReview as DomainNewReview, Review as DomainReview, ReviewListQuery},
    models::review::{NewReview as DbNewReview, Review as DbReview},
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, ReviewReader, ReviewWriter},
    schema::reviews,
};

fn filtered_reviews(query: &ReviewListQuery) -> reviews::BoxedQuery<'static, Sqlite> {
    let mut items = reviews::table.into_boxed::<Sqlite>();

    if let Some(product_id) = query.product_id {
        items = items.filter(reviews::product_id.eq(product_id));
    }

    if query.approved_only {
        items = items.filter(reviews::approved.eq(true));
    }

    items
}

impl ReviewReader for DieselRepository {
    fn list_reviews(&self, query: ReviewListQuery) -> RepositoryResult<(usize, Vec<DomainReview>)> {
        let mut conn = self.conn()?;

        let total = filtered_reviews(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        // Pending reviews first so the moderation queue stays on top.
        let mut items = filtered_reviews(&query)
            .order(reviews::approved.asc())
            .then_order_by(reviews::created_at.desc())
            .then_order_by(reviews::id.desc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let rows = items.load::<DbReview>(&mut conn)?;
        Ok((total, rows.into_iter().map(Into::into).collect()))
    }
}

impl ReviewWriter for DieselRepository {
    fn create_review(&self, new_review: &DomainNewReview) -> RepositoryResult<DomainReview> {
        let mut conn = self.conn()?;
        let created = diesel::insert_into(reviews::table)
            .values(&DbNewReview::from(new_review))
            .get_result::<DbReview>(&mut conn)?;

        Ok(created.into())
    }

    fn approve_review(&self, review_id: i32) -> RepositoryResult<DomainReview> {
        let mut conn = self.conn()?;
        let updated = diesel::update(reviews::table.filter(reviews::id.eq(review_id)))
            .set(reviews::approved.eq(true))
            .get_result::<DbReview>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_review(&self, review_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(reviews::table.filter(reviews::id.eq(review_id)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
