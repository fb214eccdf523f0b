//! Application state module

use std::{fmt, sync::Arc};

use crate::{domain::communication::mailer::Mailer, infrastructure::config::TransportConfig};

/// Global application state
pub struct AppState<M: Mailer> {
    /// Transport configuration, fixed for the life of the process
    pub config: Arc<TransportConfig>,

    /// Delivers composed messages
    pub mailer: Arc<M>,
}

impl<M: Mailer> AppState<M> {
    /// Create a new application state
    pub fn new(config: TransportConfig, mailer: M) -> Self {
        Self {
            config: Arc::new(config),
            mailer: Arc::new(mailer),
        }
    }
}

impl<M: Mailer> Clone for AppState<M> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            mailer: Arc::clone(&self.mailer),
        }
    }
}

impl<M: Mailer> fmt::Debug for AppState<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("mailer", &"Mailer")
            .finish()
    }
}

#[cfg(test)]
use crate::{
    domain::communication::mailer::MockMailer, infrastructure::config::test_config,
};

/// State backed by a mock mailer and a fixed test configuration
#[cfg(test)]
pub fn test_state(mailer: Option<MockMailer>) -> AppState<MockMailer> {
    AppState::new(test_config(), mailer.unwrap_or_default())
}
