// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Postgres client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Activities (create, list, single lookup)
//! - Dashboard queries (recent games, score series)

use crate::config::Config;
use crate::db::mahjong::{self, MahjongDetail};
use crate::db::retry::{retry_with_delay, RetryFuture};
use crate::error::AppError;
use crate::models::{
    Activity, ActivityView, Actor, Category, GameSummary, NewActivity, ScoreEntry,
};
use crate::services::codec::{self, PayloadColumns};
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::{PgPool, PgPoolOptions};

/// Maximum number of activities returned by a listing.
pub const LIST_LIMIT: i64 = 20;

const MAX_CONNECTIONS: u32 = 10;

/// Postgres database client.
#[derive(Clone)]
pub struct Database {
    pool: Option<PgPool>,
}

impl Database {
    /// Connect to Postgres, retrying with a fixed delay.
    ///
    /// Gives up after `config.db_connect_attempts` failures; the caller is
    /// expected to treat that as fatal.
    pub async fn connect(config: &Config) -> Result<Self, AppError> {
        let url = config.database_url();
        tracing::info!(
            host = %config.db_host,
            database = %config.db_name,
            attempts = config.db_connect_attempts,
            "Connecting to Postgres"
        );

        let pool = retry_with_delay(
            || -> RetryFuture<PgPool, sqlx::Error> {
                let url = url.clone();
                Box::pin(async move {
                    PgPoolOptions::new()
                        .max_connections(MAX_CONNECTIONS)
                        .connect(&url)
                        .await
                })
            },
            config.db_connect_attempts,
            config.db_connect_delay,
        )
        .await
        .map_err(|e| AppError::Database(format!("Failed to connect to Postgres: {}", e)))?;

        tracing::info!(host = %config.db_host, "Connected to Postgres");

        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { pool: None }
    }

    /// Helper to get the pool or return an error if offline.
    fn pool(&self) -> Result<&PgPool, AppError> {
        self.pool
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    /// Apply the embedded schema migrations.
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(self.pool()?).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    // ─── Activity Operations ─────────────────────────────────────

    /// Store a new activity owned by `actor`.
    ///
    /// The activity row and, for mahjong, its detail rows are written in one
    /// transaction. Nothing is persisted unless every insert and the commit
    /// succeed. The returned activity is built from the input, not re-read.
    pub async fn create_activity(
        &self,
        actor: &Actor,
        new: NewActivity,
    ) -> Result<Activity, AppError> {
        let category = new.details.category();
        let played_at = new.played_at.unwrap_or_else(Utc::now);
        let columns = codec::encode_details(&new.details)?;
        let detail = new.details.mahjong().map(MahjongDetail::project);

        let mut tx = self.pool()?.begin().await?;

        let id: i32 = sqlx::query_scalar(
            "INSERT INTO activities (user_id, category, played_at, place_name, summary_text, primary_score, image_urls, mahjong_data, golf_data)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING id",
        )
        .bind(&actor.user_id)
        .bind(category.as_str())
        .bind(played_at)
        .bind(&new.place_name)
        .bind(&new.summary_text)
        .bind(new.primary_score)
        .bind(&new.image_urls)
        .bind(columns.mahjong_data)
        .bind(columns.golf_data)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::Database(format!("Insert error: {}", e)))?;

        if let Some(detail) = &detail {
            mahjong::insert_detail(&mut *tx, id, detail)
                .await
                .map_err(|e| AppError::Database(format!("Mahjong detail error: {}", e)))?;
        }

        tx.commit().await?;

        tracing::info!(
            activity_id = id,
            user_id = %actor.user_id,
            category = %category,
            "Created activity"
        );

        Ok(new.into_activity(id, actor.user_id.clone(), played_at))
    }

    /// Most recent activities for `actor`, newest first, capped at
    /// [`LIST_LIMIT`].
    ///
    /// A record whose payload column cannot be decoded is still returned,
    /// with its payload left absent.
    pub async fn list_activities(
        &self,
        actor: &Actor,
        category: Option<Category>,
    ) -> Result<Vec<Activity>, AppError> {
        let rows: Vec<ActivityRow> = sqlx::query_as(
            "SELECT id, user_id, category, played_at, place_name, summary_text, primary_score, image_urls, mahjong_data, golf_data
             FROM activities
             WHERE user_id = $1 AND ($2::TEXT IS NULL OR category = $2)
             ORDER BY played_at DESC, id DESC
             LIMIT $3",
        )
        .bind(&actor.user_id)
        .bind(category.map(Category::as_str))
        .bind(LIST_LIMIT)
        .fetch_all(self.pool()?)
        .await?;

        tracing::debug!(
            user_id = %actor.user_id,
            category = ?category,
            count = rows.len(),
            "Listed activities"
        );

        rows.into_iter().map(ActivityRow::into_activity).collect()
    }

    /// Look up one activity by ID.
    pub async fn get_activity(
        &self,
        actor: &Actor,
        id: i32,
    ) -> Result<Option<ActivityView>, AppError> {
        let row: Option<ActivityViewRow> = sqlx::query_as(
            "SELECT id, category, played_at, place_name, primary_score, golf_data
             FROM activities
             WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(&actor.user_id)
        .fetch_optional(self.pool()?)
        .await?;

        row.map(ActivityViewRow::into_view).transpose()
    }

    // ─── Dashboard Queries ───────────────────────────────────────

    /// Latest `limit` games of `category`, newest first.
    pub async fn recent_games(
        &self,
        actor: &Actor,
        category: Category,
        limit: i64,
    ) -> Result<Vec<GameSummary>, AppError> {
        let games = sqlx::query_as(
            "SELECT id, place_name, played_at, primary_score AS score
             FROM activities
             WHERE user_id = $1 AND category = $2
             ORDER BY played_at DESC, id DESC
             LIMIT $3",
        )
        .bind(&actor.user_id)
        .bind(category.as_str())
        .bind(limit)
        .fetch_all(self.pool()?)
        .await?;

        Ok(games)
    }

    /// Scores of every `category` game played at or after `since`, oldest
    /// first.
    pub async fn score_series(
        &self,
        actor: &Actor,
        category: Category,
        since: DateTime<Utc>,
    ) -> Result<Vec<ScoreEntry>, AppError> {
        let series = sqlx::query_as(
            "SELECT played_at, primary_score AS score
             FROM activities
             WHERE user_id = $1 AND category = $2 AND played_at >= $3
             ORDER BY played_at ASC, id ASC",
        )
        .bind(&actor.user_id)
        .bind(category.as_str())
        .bind(since)
        .fetch_all(self.pool()?)
        .await?;

        Ok(series)
    }
}

/// Raw `activities` row.
#[derive(sqlx::FromRow)]
struct ActivityRow {
    id: i32,
    user_id: String,
    category: String,
    played_at: DateTime<Utc>,
    place_name: String,
    summary_text: String,
    primary_score: i32,
    image_urls: Vec<String>,
    mahjong_data: Option<Value>,
    golf_data: Option<Value>,
}

impl ActivityRow {
    fn into_activity(self) -> Result<Activity, AppError> {
        let category = parse_category(self.id, &self.category)?;
        let details = codec::decode_details(
            category,
            self.id,
            PayloadColumns {
                mahjong_data: self.mahjong_data,
                golf_data: self.golf_data,
            },
        );

        Ok(Activity {
            id: self.id,
            user_id: self.user_id,
            details,
            played_at: self.played_at,
            place_name: self.place_name,
            summary_text: self.summary_text,
            primary_score: self.primary_score,
            image_urls: self.image_urls,
        })
    }
}

/// Columns read by the single-activity lookup.
#[derive(sqlx::FromRow)]
struct ActivityViewRow {
    id: i32,
    category: String,
    played_at: DateTime<Utc>,
    place_name: String,
    primary_score: i32,
    golf_data: Option<Value>,
}

impl ActivityViewRow {
    fn into_view(self) -> Result<ActivityView, AppError> {
        let category = parse_category(self.id, &self.category)?;
        let golf_data = match category {
            Category::Golf => codec::decode_lenient(category, self.id, self.golf_data),
            Category::Mahjong => None,
        };

        Ok(ActivityView {
            id: self.id,
            category,
            played_at: self.played_at,
            place_name: self.place_name,
            primary_score: self.primary_score,
            golf_data,
        })
    }
}

fn parse_category(activity_id: i32, raw: &str) -> Result<Category, AppError> {
    raw.parse().map_err(|e| {
        AppError::Database(format!("Activity {} has invalid category: {}", activity_id, e))
    })
}
