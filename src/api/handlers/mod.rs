//! REST endpoint handlers organized by resource.

pub mod pool;
pub mod program;
pub mod query;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes the resource routes that live under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(program::routes())
        .merge(pool::routes())
        .merge(query::routes())
}
