//! Shared state for the API handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the loaded reference dataset. Cloning is cheap: every clone shares
/// the same read-only dataset.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Wraps a loaded dataset for sharing across handlers.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the loaded dataset.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }
}
