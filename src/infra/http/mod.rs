mod api;
pub mod envelope;
mod middleware;

use std::sync::Arc;

use axum::{Router, middleware as axum_middleware, routing::get};

use crate::application::content::ContentService;

pub use middleware::REQUEST_ID_HEADER;

#[derive(Clone)]
pub struct HttpState {
    pub content: Arc<ContentService>,
}

impl HttpState {
    pub fn new(content: Arc<ContentService>) -> Self {
        Self { content }
    }
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/api/tag", get(api::list_tag_groups))
        .route("/api/content", get(api::list_contents))
        .route("/api/content/{content_id}", get(api::get_content))
        .route("/_health", get(api::health))
        .method_not_allowed_fallback(api::method_not_allowed)
        .fallback(api::fallback)
        .with_state(state)
        .layer(axum_middleware::from_fn(middleware::log_responses))
        .layer(axum_middleware::from_fn(middleware::set_request_context))
}
