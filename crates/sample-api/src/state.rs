//! Application state shared by all request handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::store::TaskStore;

/// Shared application state: the task store plus server configuration.
#[derive(Clone)]
pub struct AppState {
    store: Arc<TaskStore>,
    config: Arc<ServerConfig>,
}

impl AppState {
    /// Creates a new AppState with the given store and configuration.
    pub fn new(store: Arc<TaskStore>, config: ServerConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the task store.
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Returns a reference to the server configuration.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Returns the base URL used to build `Location` headers.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Returns the page size used when a list request names none.
    pub fn default_page_size(&self) -> usize {
        self.config.default_page_size
    }

    /// Returns the largest page size a list request may ask for.
    pub fn max_page_size(&self) -> usize {
        self.config.max_page_size
    }
}
