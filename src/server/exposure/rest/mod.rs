//! REST API exposure
//!
//! Produces the Axum router: health checks at the root, every registered
//! resource under `/api`, and an enveloped 404 for anything else.

use axum::http::StatusCode;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

use crate::core::response::ApiResponse;
use crate::server::entity_registry::EntityRegistry;

/// Name reported by the health endpoints
pub const SERVICE_NAME: &str = "vocab-rs";

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router from the registry and any custom routes
    ///
    /// Custom routes are mounted under `/api` next to the resources.
    pub fn build_router(registry: &EntityRegistry, custom_routes: Vec<Router>) -> Router {
        let api = custom_routes
            .into_iter()
            .fold(registry.build_routes(), |api, custom| api.merge(custom));

        Self::health_routes()
            .nest("/api", api)
            .fallback(Self::route_not_found)
    }

    /// Build health check routes
    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    /// Health check endpoint handler
    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": SERVICE_NAME
        }))
    }

    async fn route_not_found() -> ApiResponse<()> {
        ApiResponse::failure(StatusCode::NOT_FOUND, "Route not found.").with_code("ROUTE_NOT_FOUND")
    }
}
