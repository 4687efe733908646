use axum::{
    Router,
    routing::{get, post},
};

use crate::config::AppConfig;
use crate::handlers;
use crate::state::AppState;

pub fn site_routes(config: &AppConfig) -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(auth_routes())
        .merge(admin_routes(config))
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::site::home))
        .route("/about", get(handlers::site::about_page))
        .route("/project/{id}", get(handlers::site::project_detail))
        .route("/contact", post(handlers::site::contact))
        .route("/sw.js", get(handlers::site::service_worker))
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(handlers::auth::login_form).post(handlers::auth::login),
        )
        .route("/logout", get(handlers::auth::logout))
}

fn admin_routes(config: &AppConfig) -> Router<AppState> {
    Router::new()
        .route(
            "/admin",
            get(handlers::admin::dashboard)
                .post(handlers::admin::submit)
                .layer(handlers::admin::upload_body_limit(
                    config.server.max_upload_bytes,
                )),
        )
        .route(
            "/project/delete/{id}",
            get(handlers::admin::delete_project),
        )
        .route("/social/delete/{id}", get(handlers::admin::delete_social))
}
