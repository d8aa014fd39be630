#![allow(dead_code)]

use std::env;

use chat_service::infrastructure::db::migrations::run_migrations;
use once_cell::sync::Lazy;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::sync::{Mutex, MutexGuard};

pub mod fixtures;
pub mod mocks;

static TEST_DB_MUTEX: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

pub struct TestDb {
    pool: PgPool,
    _lock: MutexGuard<'static, ()>,
}

impl TestDb {
    /// Connects to the database named by `TEST_DATABASE_URL`/`DATABASE_URL`,
    /// runs migrations and empties the chat tables. Returns `None` when no
    /// database is configured or reachable so suites skip silently.
    pub async fn new() -> Option<Self> {
        dotenvy::dotenv().ok();
        let url = env::var("TEST_DATABASE_URL")
            .ok()
            .or_else(|| env::var("DATABASE_URL").ok())?;

        let lock = Lazy::force(&TEST_DB_MUTEX).lock().await;

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .ok()?;

        run_migrations(&pool).await.ok()?;

        sqlx::query("TRUNCATE conversations, messages")
            .execute(&pool)
            .await
            .ok()?;

        Some(Self { pool, _lock: lock })
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }
}
