use crate::{database::SharedStore, middleware::cors::cors_layer};
use axum::{middleware, Extension, Router};

mod leaderboard;

/// Creates the application router with all the routes using the
/// provided store for every request
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .nest("/api", api_router())
        .layer(Extension(store))
}

/// Creates a router for the routes that reside under /api
fn api_router() -> Router {
    Router::new()
        // Leaderboard routing
        .merge(leaderboard::router())
        // CORS middleware is applied to all API routes to allow browser access
        .layer(middleware::from_fn(cors_layer))
}
