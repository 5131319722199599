// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Acting-user middleware.
//!
//! There is no login: every API request acts as the configured default user.
//! Handlers read the [`Actor`] from request extensions instead of assuming a
//! global user.

use crate::models::Actor;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Middleware that attaches the acting user to the request.
pub async fn assign_actor(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let actor = Actor::new(state.config.default_user_id.clone());
    request.extensions_mut().insert(actor);

    next.run(request).await
}
