use diesel::prelude::*;
use diesel::sql_types::Integer;

mod common;

#[derive(QueryableByName)]
struct Pragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

#[test]
fn test_creates_and_removes_db_files() {
    let base = "test_in_memory_connection.db";

    {
        let test_db = common::TestDb::new(base);
        let conn = test_db.pool().get();
        assert!(conn.is_ok());
    }

    let db_path = std::path::Path::new(base);
    assert!(!db_path.exists());
    assert!(!std::path::Path::new(&format!("{base}-shm")).exists());
    assert!(!std::path::Path::new(&format!("{base}-wal")).exists());
}

#[test]
fn test_pooled_connections_enforce_foreign_keys() {
    let test_db = common::TestDb::new("test_pooled_connections_enforce_foreign_keys.db");
    let mut conn = test_db.pool().get().unwrap();

    let pragma: Pragma = diesel::sql_query("PRAGMA foreign_keys")
        .get_result(&mut conn)
        .unwrap();

    assert_eq!(pragma.foreign_keys, 1);
}

#[test]
fn test_migrations_are_idempotent() {
    let test_db = common::TestDb::new("test_migrations_are_idempotent.db");
    let mut conn = test_db.pool().get().unwrap();

    let applied = pushkind_store::db::run_migrations(&mut conn).unwrap();

    assert_eq!(applied, 0);
}
