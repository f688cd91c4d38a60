#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
// easier to use when using the functions as callback of foreign functions
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::missing_errors_doc)]
//! Scribbly, personal notes with pins, labels, checklists and search

use axum::Extension;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::api::JwtKeys;
use crate::api::router;
use crate::storage::Storage;

pub mod api;
pub mod config;
pub mod editor;
pub mod errors;
pub mod graceful_shutdown;
pub mod labels;
pub mod notes;
pub mod repository;
pub mod search;
pub mod session;
pub mod storage;
#[cfg(test)]
mod tests;
pub mod users;

/// Create the router for Scribbly
pub fn create_router<S: Storage>(storage: S, jwt_keys: JwtKeys) -> Router {
    Router::new()
        .nest("/api", router::<S>())
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(storage))
        .layer(Extension(jwt_keys))
}
