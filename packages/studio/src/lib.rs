pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod flash;
pub mod handlers;
pub mod mail;
pub mod models;
pub mod profile;
pub mod routes;
pub mod seed;
pub mod state;
pub mod uploads;
pub mod utils;
pub mod views;

use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let static_dir = ServeDir::new(&state.config.site.static_dir);

    routes::site_routes(&state.config)
        .with_state(state)
        .nest_service("/static", static_dir)
        .layer(TraceLayer::new_for_http())
}
