//! Dashboard statistics.
//!
//! Derived on every request from the activities table; nothing here is
//! persisted.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::time_utils::format_chart_date;

/// Dashboard response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DashboardStats {
    /// Cumulative mahjong score for the current year
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_score: i64,
    /// Most recently played mahjong games, newest first
    pub recent_games: Vec<GameSummary>,
    /// One point per game this year, oldest first
    pub chart_data: Vec<ChartPoint>,
}

/// Summary of a single game for the "recent games" list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GameSummary {
    pub id: i32,
    pub place_name: String,
    pub played_at: DateTime<Utc>,
    pub score: i32,
}

/// Point on the cumulative score chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ChartPoint {
    /// "MM/DD" in the server's local time
    pub date: String,
    pub daily_score: i32,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub cumulative_score: i64,
}

/// Score of one game, as read for the chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::FromRow)]
pub struct ScoreEntry {
    pub played_at: DateTime<Utc>,
    pub score: i32,
}

impl DashboardStats {
    /// Fold a chronologically ordered score series into chart points.
    ///
    /// `tz` decides the calendar date shown for each point.
    pub fn from_series<Tz>(recent_games: Vec<GameSummary>, series: &[ScoreEntry], tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let mut cumulative: i64 = 0;
        let chart_data = series
            .iter()
            .map(|entry| {
                cumulative += i64::from(entry.score);
                ChartPoint {
                    date: format_chart_date(entry.played_at, tz),
                    daily_score: entry.score,
                    cumulative_score: cumulative,
                }
            })
            .collect();

        Self {
            total_score: cumulative,
            recent_games,
            chart_data,
        }
    }
}
