// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use ajito_tracker::config::Config;
use ajito_tracker::db::Database;
use ajito_tracker::routes::create_router;
use ajito_tracker::services::UploadStore;
use ajito_tracker::AppState;
use std::path::Path;
use std::sync::Arc;

/// Postgres URL for integration tests, if configured.
#[allow(dead_code)]
pub fn database_url() -> Option<String> {
    std::env::var("TEST_DATABASE_URL").ok()
}

/// Skip test with message if no test database is configured.
#[macro_export]
macro_rules! require_database {
    () => {
        if crate::common::database_url().is_none() {
            eprintln!("⚠️  Skipping: TEST_DATABASE_URL not set");
            return;
        }
    };
}

/// Connect to the test database and apply migrations.
#[allow(dead_code)]
pub async fn test_pool() -> sqlx::PgPool {
    let url = database_url().expect("TEST_DATABASE_URL not set");
    let pool = sqlx::PgPool::connect(&url)
        .await
        .expect("Failed to connect to test database");
    Database::from_pool(pool.clone())
        .run_migrations()
        .await
        .expect("Failed to run migrations");
    pool
}

/// Create a test database client.
#[allow(dead_code)]
pub async fn test_db() -> Database {
    Database::from_pool(test_pool().await)
}

/// Build a router around `db`, storing uploads in `upload_dir`.
#[allow(dead_code)]
pub fn create_app_with(db: Database, upload_dir: &Path) -> (axum::Router, Arc<AppState>) {
    let config = Config {
        upload_dir: upload_dir.to_path_buf(),
        ..Config::test_default()
    };
    let uploads = UploadStore::new(upload_dir);

    let state = Arc::new(AppState { config, db, uploads });

    (create_router(state.clone()), state)
}

/// Create a test app with an offline database.
#[allow(dead_code)]
pub fn create_test_app(upload_dir: &Path) -> (axum::Router, Arc<AppState>) {
    create_app_with(Database::new_mock(), upload_dir)
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}

/// Unique suffix for test isolation in a shared database.
#[allow(dead_code)]
pub fn unique_suffix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos()
        .to_string()
}
