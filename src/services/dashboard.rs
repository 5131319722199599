// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard aggregation.
//!
//! Runs two independent reads (recent games, this year's score series) and
//! folds the series into a running total. The reads do not share a snapshot.

use crate::db::Database;
use crate::error::Result;
use crate::models::{Actor, Category, DashboardStats};
use crate::time_utils::start_of_year;
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Number of games shown in the "recent games" list.
pub const RECENT_GAMES_LIMIT: i64 = 5;

/// Category the dashboard reports on.
pub const DASHBOARD_CATEGORY: Category = Category::Mahjong;

/// Compute dashboard stats as of `now`; the year boundary and chart dates
/// follow `now`'s time zone.
pub async fn build_dashboard<Tz>(
    db: &Database,
    actor: &Actor,
    now: DateTime<Tz>,
) -> Result<DashboardStats>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let recent_games = db
        .recent_games(actor, DASHBOARD_CATEGORY, RECENT_GAMES_LIMIT)
        .await?;

    let since = start_of_year(&now);
    let series = db.score_series(actor, DASHBOARD_CATEGORY, since).await?;

    let stats = DashboardStats::from_series(recent_games, &series, &now.timezone());

    tracing::debug!(
        user_id = %actor.user_id,
        since = %since,
        games_this_year = series.len(),
        total_score = stats.total_score,
        "Built dashboard"
    );

    Ok(stats)
}
