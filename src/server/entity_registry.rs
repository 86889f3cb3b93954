//! Registry of resource descriptors, each contributing its own routes

use axum::Router;
use std::collections::BTreeMap;

/// Describes one REST resource and builds its routes
///
/// Routes are returned with their state already applied and are mounted
/// under `/api` by the REST exposure.
pub trait EntityDescriptor: Send + Sync {
    /// The resource name (singular, e.g., "category")
    fn entity_type(&self) -> &str;

    /// Build the routes for this resource
    fn build_routes(&self) -> Router;
}

/// Registry for all resources exposed by the server
///
/// Descriptors are keyed by entity type; registering the same type twice
/// replaces the earlier descriptor.
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a resource descriptor
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        if self.descriptors.insert(entity_type.clone(), descriptor).is_some() {
            tracing::debug!(entity_type, "descriptor replaced");
        }
    }

    /// Merge the routes of every registered resource
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, d| router.merge(d.build_routes()))
    }

    /// Registered entity types, in name order
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::get;
    use axum_test::TestServer;

    struct StaticDescriptor {
        entity_type: &'static str,
        path: &'static str,
    }

    impl EntityDescriptor for StaticDescriptor {
        fn entity_type(&self) -> &str {
            self.entity_type
        }

        fn build_routes(&self) -> Router {
            let body = self.path;
            Router::new().route(&format!("/{}", self.path), get(move || async move { body }))
        }
    }

    fn descriptor(entity_type: &'static str, path: &'static str) -> Box<dyn EntityDescriptor> {
        Box::new(StaticDescriptor { entity_type, path })
    }

    #[test]
    fn test_new_registry_is_empty() {
        assert!(EntityRegistry::new().entity_types().is_empty());
    }

    #[test]
    fn test_entity_types_sorted() {
        let mut registry = EntityRegistry::new();
        registry.register(descriptor("language", "languages"));
        registry.register(descriptor("category", "categories"));
        assert_eq!(registry.entity_types(), vec!["category", "language"]);
    }

    #[test]
    fn test_register_duplicate_replaces() {
        let mut registry = EntityRegistry::new();
        registry.register(descriptor("category", "categories"));
        registry.register(descriptor("category", "groups"));
        assert_eq!(registry.entity_types().len(), 1);
    }

    #[tokio::test]
    async fn test_build_routes_merges_descriptors() {
        let mut registry = EntityRegistry::new();
        registry.register(descriptor("category", "categories"));
        registry.register(descriptor("language", "languages"));

        let server = TestServer::new(registry.build_routes()).unwrap();
        server.get("/categories").await.assert_text("categories");
        server.get("/languages").await.assert_text("languages");
    }
}
