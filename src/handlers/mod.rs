pub mod health;
pub mod portal;

use std::sync::Arc;

use crate::directory::{DirectoryConfig, PortalError, SessionDirectory};
use crate::models::PortalConfig;
use crate::session::SessionRegistry;
use crate::storage::{DirectoryStore, create_store};

/// Shared state for the portal routes
#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<SessionDirectory>,
    pub sessions: SessionRegistry,
    pub config: Arc<PortalConfig>,
}

impl AppState {
    /// Build the state with the store named by the configuration
    pub fn new(config: Arc<PortalConfig>) -> Result<Self, PortalError> {
        let store = create_store(&config.storage, &config.storage_key);
        Self::with_store(config, store)
    }

    /// Build the state over an explicit store
    pub fn with_store(
        config: Arc<PortalConfig>,
        store: Arc<dyn DirectoryStore>,
    ) -> Result<Self, PortalError> {
        let directory = SessionDirectory::new(store, DirectoryConfig::from(config.as_ref()))?;
        Ok(Self {
            directory: Arc::new(directory),
            sessions: SessionRegistry::new(),
            config,
        })
    }
}
