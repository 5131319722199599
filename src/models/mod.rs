// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod actor;
pub mod stats;

pub use activity::{
    Activity, ActivityDetails, ActivityView, Category, GolfData, HoleStats, MahjongData,
    MahjongRound, NewActivity, Yakuman,
};
pub use actor::Actor;
pub use stats::{ChartPoint, DashboardStats, GameSummary, ScoreEntry};
