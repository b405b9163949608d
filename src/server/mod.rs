use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

mod handlers;
mod state;

pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/api/generate-titles", post(handlers::generate_titles))
        .route("/api/generate-body", post(handlers::generate_body))
        .route("/api/generate-cta", post(handlers::generate_cta))
        .route("/api/generate-hashtags", post(handlers::generate_hashtags))
        .route("/api/generate-post", post(handlers::generate_post))
        .route("/api/compose", post(handlers::compose))
        .route("/api/tech-news", get(handlers::tech_news))
        .route("/api/extract-content", post(handlers::extract_content))
        .route("/api/topics", get(handlers::list_topics))
        .route("/api/topics/:name/related", get(handlers::related_topics))
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/categories/:name/insights", get(handlers::category_insights))
        .route("/api/templates", get(handlers::list_templates))
        .route("/api/templates/:id", get(handlers::get_template))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}
