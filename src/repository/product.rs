use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    domain::product::{
        NewProduct as DomainNewProduct, Product as DomainProduct, ProductListQuery,
        UpdateProduct as DomainUpdateProduct,
    },
    models::product::{
        NewProduct as DbNewProduct, Product as DbProduct, UpdateProduct as DbUpdateProduct,
    },
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{DieselRepository, ProductReader, ProductWriter},
    schema::{categories, products},
};

/// Products matching every filter of `query`, without ordering or paging.
fn filtered_products(query: &ProductListQuery) -> products::BoxedQuery<'static, Sqlite> {
    let mut items = products::table.into_boxed::<Sqlite>();

    if let Some(term) = query.search.as_ref() {
        let pattern = format!("%{}%", term.trim());
        items = items.filter(products::name.like(pattern));
    }

    if let Some(name) = query.category.as_ref() {
        let ids = categories::table
            .filter(categories::name.eq(name.clone()))
            .select(categories::id.nullable());
        items = items.filter(products::category_id.eq_any(ids));
    }

    if let Some(subcategory) = query.subcategory.as_ref() {
        let ids = categories::table
            .filter(categories::subcategory.eq(subcategory.clone()))
            .select(categories::id.nullable());
        items = items.filter(products::category_id.eq_any(ids));
    }

    items
}

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<DomainProduct>> {
        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(Into::into))
    }

    fn get_products_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<DomainProduct>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let products = products::table
            .filter(products::id.eq_any(ids))
            .load::<DbProduct>(&mut conn)?;

        Ok(products.into_iter().map(Into::into).collect())
    }

    fn list_products(
        &self,
        query: ProductListQuery,
    ) -> RepositoryResult<(usize, Vec<DomainProduct>)> {
        let mut conn = self.conn()?;

        let total = filtered_products(&query)
            .count()
            .get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered_products(&query)
            .order(products::created_at.desc())
            .then_order_by(products::id.desc());

        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let db_products = items.load::<DbProduct>(&mut conn)?;

        Ok((total, db_products.into_iter().map(Into::into).collect()))
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;

        let created = diesel::insert_into(products::table)
            .values(&DbNewProduct::from(new_product))
            .get_result::<DbProduct>(&mut conn)?;

        Ok(created.into())
    }

    fn update_product(
        &self,
        product_id: i32,
        updates: &DomainUpdateProduct,
    ) -> RepositoryResult<DomainProduct> {
        let mut conn = self.conn()?;

        let updated = diesel::update(products::table.filter(products::id.eq(product_id)))
            .set(&DbUpdateProduct::from(updates))
            .get_result::<DbProduct>(&mut conn)?;

        Ok(updated.into())
    }

    fn delete_product(&self, product_id: i32) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(products::table.filter(products::id.eq(product_id)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
