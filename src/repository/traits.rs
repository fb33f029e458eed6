use async_trait::async_trait;

use crate::error::Result;
use crate::models::{FrameworkState, SessionRegistry};

/// Persistence of the single live framework-state snapshot
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait StateStorage: Send + Sync {
    /// Load the persisted state. `None` when nothing usable is stored;
    /// malformed data is degraded to `None` by the implementation.
    async fn load_state(&self) -> Result<Option<FrameworkState>>;

    /// Persist the full state snapshot
    async fn save_state(&self, state: &FrameworkState) -> Result<()>;
}

/// Persistence of the named-session registry
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait SessionStorage: Send + Sync {
    /// Load the session registry; empty when nothing usable is stored
    async fn load_sessions(&self) -> Result<SessionRegistry>;

    /// Persist the full session registry
    async fn save_sessions(&self, registry: &SessionRegistry) -> Result<()>;
}

/// Combined repository trait for callers that need both storage concerns
#[async_trait]
pub trait Repository: StateStorage + SessionStorage + Send + Sync {}

// Automatically implement Repository for any type that implements all sub-traits
impl<T> Repository for T where T: StateStorage + SessionStorage + Send + Sync {}
