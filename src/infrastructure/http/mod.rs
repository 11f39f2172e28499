//! HTTP routes

mod admin_routes;

use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all page and API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Admin dashboard page
        .route("/sheet/admin/1", get(admin_routes::admin_page))
        // Admin API
        .route("/api/admin/props", get(admin_routes::admin_props))
        .route("/api/admin/environment", put(admin_routes::update_environment))
        .route("/api/admin/notes", put(admin_routes::update_notes))
}
