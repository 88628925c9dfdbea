//! Application state management

use std::sync::Arc;

use crate::config::Config;
use crate::session::SessionRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    sessions: SessionRegistry,
}

impl AppState {
    /// Create a new application state with an empty session registry
    pub fn new(config: Config) -> Self {
        let sessions = SessionRegistry::new(config.session.max_sessions);
        Self {
            inner: Arc::new(AppStateInner { config, sessions }),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get the session registry
    pub fn sessions(&self) -> &SessionRegistry {
        &self.inner.sessions
    }
}
