// src/common/migrations.rs
//! Database schema management

use sqlx::SqlitePool;
use std::env;
use tracing::{info, warn};

/// Run all database migrations
///
/// Tables are created if missing. Set RESET_DB=true to drop and recreate
/// the schema, which loses all data.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let should_reset_db = env::var("RESET_DB").unwrap_or_else(|_| "false".to_string()) == "true";

    if should_reset_db {
        warn!("RESET_DB=true - dropping all tables and recreating schema");
        drop_all_tables(pool).await?;
    }

    create_tables(pool).await?;
    create_indexes(pool).await?;

    info!("Database migration completed");

    Ok(())
}

async fn drop_all_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for table in ["notes", "otps", "recovery_tokens", "users"] {
        sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
            .execute(pool)
            .await?;
    }
    Ok(())
}

async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    // password_hash is NULL for federated accounts with no local password
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT,
            is_verified INTEGER NOT NULL DEFAULT 0,
            picture TEXT,
            provider TEXT,
            provider_id TEXT,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // The primary key on user_id enforces at most one live OTP per user;
    // concurrent issue requests collide on the insert instead of racing.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS otps (
            user_id TEXT PRIMARY KEY REFERENCES users(id),
            code INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            expires_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Capability-revocation store for password recovery: one live token
    // per user, deleted on successful use.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS recovery_tokens (
            user_id TEXT PRIMARY KEY REFERENCES users(id),
            token TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notes (
            id TEXT PRIMARY KEY,
            user_id TEXT NOT NULL REFERENCES users(id),
            title TEXT,
            notes TEXT NOT NULL,
            tags TEXT,
            shared INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

async fn create_indexes(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_users_email ON users(email)",
        "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_provider ON users(provider, provider_id)
             WHERE provider IS NOT NULL AND provider_id IS NOT NULL",
        "CREATE INDEX IF NOT EXISTS idx_recovery_tokens_token ON recovery_tokens(token)",
        "CREATE INDEX IF NOT EXISTS idx_notes_user ON notes(user_id)",
        "CREATE INDEX IF NOT EXISTS idx_notes_user_shared ON notes(user_id, shared)",
    ];

    for stmt in indexes {
        sqlx::query(stmt).execute(pool).await?;
    }

    Ok(())
}
