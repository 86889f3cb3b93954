//! Shared application state handed to every handler

use axum::extract::FromRef;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::auth::{AuthProvider, TokenService};
use crate::core::service::VocabStore;

/// Application state shared across handlers
///
/// Everything a handler needs is reachable from here; nothing is read from
/// globals or the environment at request time.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VocabStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub tokens: TokenService,
    pub config: Arc<AppConfig>,
}

impl FromRef<AppState> for Arc<dyn AuthProvider> {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
