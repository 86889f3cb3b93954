//! ServerBuilder for fluent API to build HTTP servers

use super::entity_registry::{EntityDescriptor, EntityRegistry};
use super::exposure::RestExposure;
use super::handlers::{
    AuthDescriptor, CategoryDescriptor, LanguageDescriptor, ProgressDescriptor,
    VocabEntryDescriptor,
};
use super::state::AppState;
use crate::config::{AppConfig, ServerConfig};
use crate::core::auth::{AuthProvider, JwtAuthProvider, TokenService};
use crate::core::service::VocabStore;
use crate::storage::InMemoryStore;
use anyhow::Result;
use axum::Router;
use axum::http::{HeaderValue, Method, header};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builder for creating the vocabulary HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(config)
///     .with_store(InMemoryStore::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    store: Option<Arc<dyn VocabStore>>,
    auth_provider: Option<Arc<dyn AuthProvider>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            store: None,
            auth_provider: None,
            custom_routes: Vec::new(),
        }
    }

    /// Use the given configuration
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the persistence backend (defaults to an empty in-memory store)
    pub fn with_store(mut self, store: impl VocabStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Share an existing store handle
    pub fn with_shared_store(mut self, store: Arc<dyn VocabStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the JWT provider with another way of resolving principals
    pub fn with_auth_provider(mut self, provider: impl AuthProvider + 'static) -> Self {
        self.auth_provider = Some(Arc::new(provider));
        self
    }

    /// Add custom routes, mounted under `/api`
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Validate the configuration and assemble the shared state
    pub fn build_state(&mut self) -> Result<AppState> {
        self.config.validate()?;

        let tokens = TokenService::new(&self.config.auth);
        let auth = self
            .auth_provider
            .take()
            .unwrap_or_else(|| Arc::new(JwtAuthProvider::new(tokens.clone())));
        let store = self
            .store
            .take()
            .unwrap_or_else(|| Arc::new(InMemoryStore::new()));

        Ok(AppState {
            store,
            auth,
            tokens,
            config: Arc::new(self.config.clone()),
        })
    }

    /// Build the final REST router
    ///
    /// Registers every resource, mounts them under `/api` next to the
    /// health routes, and adds request tracing and CORS.
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state()?;
        let registry = default_registry(&state);
        let custom_routes = std::mem::take(&mut self.custom_routes);

        tracing::debug!(resources = ?registry.entity_types(), "routes registered");

        let app = RestExposure::build_router(&registry, custom_routes).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&self.config.server)),
        );
        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.host:server.port` from the configuration and stops
    /// on SIGTERM or Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.bind_addr();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry with every resource of the vocabulary API
pub fn default_registry(state: &AppState) -> EntityRegistry {
    let descriptors: Vec<Box<dyn EntityDescriptor>> = vec![
        Box::new(AuthDescriptor::new(state.clone())),
        Box::new(CategoryDescriptor::new(state.clone())),
        Box::new(VocabEntryDescriptor::new(state.clone())),
        Box::new(LanguageDescriptor::new(state.clone())),
        Box::new(ProgressDescriptor::new(state.clone())),
    ];

    let mut registry = EntityRegistry::new();
    for descriptor in descriptors {
        registry.register(descriptor);
    }
    registry
}

/// CORS layer from the configured origins; `"*"` allows any origin
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    if config.cors_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(origins)
}

/// Wait for a shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::access::{Principal, Role};
    use crate::core::error::ApiResult;
    use async_trait::async_trait;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::get;
    use axum_test::TestServer;
    use uuid::Uuid;

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = ServerBuilder::new();
        assert!(builder.store.is_none());
        assert!(builder.auth_provider.is_none());
        assert!(builder.custom_routes.is_empty());
    }

    #[test]
    fn test_build_state_defaults_store_and_provider() {
        let mut builder = ServerBuilder::new();
        let state = builder.build_state().unwrap();
        assert_eq!(state.config.server.port, 3001);
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.auth.jwt_secret = String::new();

        let result = ServerBuilder::new().with_config(config).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_default_registry_covers_every_resource() {
        let state = ServerBuilder::new().build_state().unwrap();
        let registry = default_registry(&state);
        assert_eq!(
            registry.entity_types(),
            vec!["category", "language", "progress", "user", "vocab_entry"]
        );
    }

    // === Auth provider ===

    struct FixedProvider(Principal);

    #[async_trait]
    impl AuthProvider for FixedProvider {
        async fn authenticate(&self, _headers: &HeaderMap) -> ApiResult<Principal> {
            Ok(self.0)
        }
    }

    #[tokio::test]
    async fn test_custom_auth_provider_replaces_jwt() {
        let principal = Principal::new(Uuid::new_v4(), Role::User);
        let app = ServerBuilder::new()
            .with_auth_provider(FixedProvider(principal))
            .build()
            .unwrap();
        let server = TestServer::new(app).unwrap();

        // No Authorization header, the provider decides
        let response = server.get("/api/categories").await;
        response.assert_status_ok();

        let response = server
            .get(&format!("/api/categories?user_id={}", Uuid::new_v4()))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    // === CORS ===

    async fn preflight(origins: &[&str], origin: &'static str) -> Option<HeaderValue> {
        let config = ServerConfig {
            cors_origins: origins.iter().map(|o| o.to_string()).collect(),
            ..ServerConfig::default()
        };
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(cors_layer(&config));
        let server = TestServer::new(app).unwrap();

        let response = server
            .method(Method::OPTIONS, "/ping")
            .add_header(header::ORIGIN, HeaderValue::from_static(origin))
            .add_header(
                header::ACCESS_CONTROL_REQUEST_METHOD,
                HeaderValue::from_static("GET"),
            )
            .await;
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .cloned()
    }

    #[tokio::test]
    async fn test_cors_allows_listed_origin_only() {
        let origins = ["http://localhost:8081", "bad\norigin"];

        assert_eq!(
            preflight(&origins, "http://localhost:8081").await,
            Some(HeaderValue::from_static("http://localhost:8081"))
        );
        assert_eq!(preflight(&origins, "http://evil.example").await, None);
    }

    #[tokio::test]
    async fn test_cors_wildcard_allows_any_origin() {
        assert_eq!(
            preflight(&["*"], "http://anywhere.example").await,
            Some(HeaderValue::from_static("*"))
        );
    }
}
