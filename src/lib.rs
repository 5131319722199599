// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ajito tracker: a personal log of mahjong games and golf rounds.
//!
//! This crate provides the backend API for recording activities, storing
//! their category-specific payloads and serving dashboard statistics.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::Database;
use services::UploadStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub uploads: UploadStore,
}
