// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity and dashboard API routes.

use crate::error::{AppError, Result};
use crate::models::{Activity, ActivityView, Actor, Category, DashboardStats, NewActivity};
use crate::services::build_dashboard;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

/// API routes. The actor middleware is applied in routes/mod.rs.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/dashboard", get(get_dashboard))
        .route(
            "/api/activities",
            get(list_activities).post(create_activity),
        )
        .route("/api/activities/{id}", get(get_activity))
}

// ─── Dashboard ───────────────────────────────────────────────

/// Mahjong totals for the current year.
async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<Actor>,
) -> Result<Json<DashboardStats>> {
    let stats = build_dashboard(&state.db, &actor, chrono::Local::now()).await?;
    Ok(Json(stats))
}

// ─── Activities ──────────────────────────────────────────────

/// Record a new activity.
async fn create_activity(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<Actor>,
    Json(new): Json<NewActivity>,
) -> Result<(StatusCode, Json<Activity>)> {
    tracing::debug!(
        user_id = %actor.user_id,
        category = %new.details.category(),
        "Creating activity"
    );

    let activity = state.db.create_activity(&actor, new).await?;
    Ok((StatusCode::CREATED, Json(activity)))
}

#[derive(Deserialize)]
struct ActivitiesQuery {
    /// Filter by category; empty means all
    category: Option<String>,
}

fn parse_category_filter(raw: Option<&str>) -> Result<Option<Category>> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|e| AppError::BadRequest(format!("Invalid 'category' parameter: {}", e))),
    }
}

/// Recent activities, newest first.
async fn list_activities(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<Actor>,
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<Vec<Activity>>> {
    let category = parse_category_filter(params.category.as_deref())?;
    let activities = state.db.list_activities(&actor, category).await?;
    Ok(Json(activities))
}

/// Single activity lookup.
async fn get_activity(
    State(state): State<Arc<AppState>>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<i32>,
) -> Result<Json<ActivityView>> {
    state
        .db
        .get_activity(&actor, id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Activity {} not found", id)))
}
