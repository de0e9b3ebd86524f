//! Helpers for integration tests.
#![allow(dead_code)]

use pushkind_store::db::{DbPool, establish_connection_pool, run_migrations};
use pushkind_store::domain::product::{NewProduct, Product};
use pushkind_store::domain::user::{NewUser, User};
use pushkind_store::repository::{DieselRepository, ProductWriter, UserWriter};
use pushkind_store::services::auth::hash_password;

/// Temporary database used in integration tests.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        std::fs::remove_file(filename).ok(); // Clean up old DB

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        run_migrations(&mut conn).expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.filename).ok();
        std::fs::remove_file(format!("{}-shm", &self.filename)).ok();
        std::fs::remove_file(format!("{}-wal", &self.filename)).ok();
    }
}

pub fn create_user(repo: &DieselRepository, username: &str, password: &str, admin: bool) -> User {
    let hash = hash_password(password).expect("hash password");
    let mut new_user = NewUser::new(username, format!("{username}@example.com"), hash);
    if admin {
        new_user = new_user.admin();
    }
    repo.create_user(&new_user).expect("create user")
}

pub fn create_product(repo: &DieselRepository, name: &str, price_cents: i64, stock: i32) -> Product {
    repo.create_product(&NewProduct::new(name, price_cents, stock))
        .expect("create product")
}
