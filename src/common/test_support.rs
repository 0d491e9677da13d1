//! Shared helpers for service-level tests against in-memory SQLite

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use super::helpers::now_rfc3339;
use super::id_generator::generate_user_id;
use super::migrations::run_migrations;

/// In-memory pool with the real schema applied. A single connection is
/// required: each `sqlite::memory:` connection is its own database.
pub async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("failed to open in-memory database");

    run_migrations(&pool).await.expect("migrations failed");

    pool
}

/// Insert a user with a local password hash and return its id
pub async fn insert_test_user(pool: &SqlitePool, email: &str, password_hash: &str) -> String {
    let id = generate_user_id();
    let now = now_rfc3339();

    sqlx::query(
        r#"
        INSERT INTO users (id, name, email, password_hash, is_verified, created_at, updated_at)
        VALUES (?, ?, ?, ?, 0, ?, ?)
        "#,
    )
    .bind(&id)
    .bind("Test User")
    .bind(email)
    .bind(password_hash)
    .bind(&now)
    .bind(&now)
    .execute(pool)
    .await
    .expect("failed to insert test user");

    id
}
