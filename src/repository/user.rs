use diesel::prelude::*;

use crate::{
    domain::user::{
        NewUser as DomainNewUser, UpdateUser as DomainUpdateUser, User as DomainUser,
        UserListQuery,
    },
    models::user::{NewUser as DbNewUser, UpdateUser as DbUpdateUser, User as DbUser},
    repository::errors::RepositoryResult,
    repository::{DieselRepository, UserReader, UserWriter},
};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: i32) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::id.eq(id))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn get_user_by_email(&self, email: &str) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::email.eq(email.trim().to_lowercase()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn get_user_by_username(&self, username: &str) -> RepositoryResult<Option<DomainUser>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let user = users::table
            .filter(users::username.eq(username.trim()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        Ok(user.map(Into::into))
    }

    fn get_users_by_ids(&self, ids: &[i32]) -> RepositoryResult<Vec<DomainUser>> {
        use crate::schema::users;

        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn()?;
        let users = users::table
            .filter(users::id.eq_any(ids))
            .load::<DbUser>(&mut conn)?;

        Ok(users.into_iter().map(Into::into).collect())
    }

    fn list_users(&self, query: UserListQuery) -> RepositoryResult<(usize, Vec<DomainUser>)> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        let filtered = || {
            let mut items = users::table.into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(term) = query.search.as_ref() {
                let pattern = format!("%{}%", term.trim());
                items = items.filter(
                    users::username
                        .like(pattern.clone())
                        .or(users::email.like(pattern)),
                );
            }
            items
        };

        let total = filtered().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = filtered().order(users::created_at.desc()).then_order_by(users::id.desc());
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let users = items.load::<DbUser>(&mut conn)?;
        Ok((total, users.into_iter().map(Into::into).collect()))
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &DomainNewUser) -> RepositoryResult<DomainUser> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let created = diesel::insert_into(users::table)
            .values(&DbNewUser::from(new_user))
            .get_result::<DbUser>(&mut conn)?;

        Ok(created.into())
    }

    fn update_user(
        &self,
        user_id: i32,
        updates: &DomainUpdateUser,
    ) -> RepositoryResult<DomainUser> {
        use crate::schema::users;

        let mut conn = self.conn()?;

        if updates.is_empty() {
            let user = users::table
                .filter(users::id.eq(user_id))
                .first::<DbUser>(&mut conn)?;
            return Ok(user.into());
        }

        let updated = diesel::update(users::table.filter(users::id.eq(user_id)))
            .set(&DbUpdateUser::from(updates))
            .get_result::<DbUser>(&mut conn)?;

        Ok(updated.into())
    }
}
