//! snipman-devserver
//!
//! In-memory implementation of the snippet API under `/api/v1`, for local
//! development and as the backend of integration tests.

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

pub use state::AppState;
pub use store::SnippetStore;

pub const API_BASE_PATH: &str = "/api/v1";

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/snippets",
            get(routes::snippets::list_snippets).post(routes::snippets::create_snippet),
        )
        .route(
            "/snippets/{id}",
            get(routes::snippets::get_snippet)
                .put(routes::snippets::update_snippet)
                .delete(routes::snippets::delete_snippet),
        )
        .route(
            "/snippets/{id}/tags/{tag_id}",
            post(routes::snippets::attach_tag).delete(routes::snippets::detach_tag),
        )
        .route(
            "/tags",
            get(routes::tags::list_tags).post(routes::tags::create_tag),
        )
        .route(
            "/tags/{id}",
            get(routes::tags::get_tag)
                .put(routes::tags::rename_tag)
                .delete(routes::tags::delete_tag),
        );

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest(API_BASE_PATH, api)
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
