use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{FrameworkState, SessionSnapshot, SessionSummary};
use crate::repository::{Repository, SessionStorage, StateStorage};

/// Named snapshot save/load/list over the live `FrameworkState`.
///
/// Shares the live-state lock with the store; `load` is the only other
/// wholesale replacement of the live value.
pub struct SessionManager<R: Repository> {
    state: Arc<RwLock<FrameworkState>>,
    repository: Arc<R>,
}

impl<R: Repository> SessionManager<R> {
    pub fn new(state: Arc<RwLock<FrameworkState>>, repository: Arc<R>) -> Self {
        Self { state, repository }
    }

    /// Copy the current live state into the named slot, overwriting any
    /// existing slot of the same name. Returns the save timestamp.
    pub async fn save(&self, name: &str) -> Result<String> {
        let snapshot = SessionSnapshot {
            state: self.state.read().await.clone(),
            saved_at: Utc::now().to_rfc3339(),
        };
        let saved_at = snapshot.saved_at.clone();

        let mut registry = self.repository.load_sessions().await?;
        let overwrote = registry.insert(name.to_string(), snapshot).is_some();
        self.repository.save_sessions(&registry).await?;

        tracing::info!(
            "Saved session '{}'{}",
            name,
            if overwrote { " (overwrote existing slot)" } else { "" }
        );
        Ok(saved_at)
    }

    /// Replace the entire live state with the named snapshot. Returns false
    /// and leaves the live state untouched if the slot does not exist —
    /// absence is an expected case, not an error.
    pub async fn load(&self, name: &str) -> Result<bool> {
        let registry = self.repository.load_sessions().await?;
        let Some(snapshot) = registry.get(name) else {
            tracing::info!("Session '{}' not found, live state unchanged", name);
            return Ok(false);
        };

        self.repository.save_state(&snapshot.state).await?;
        *self.state.write().await = snapshot.state.clone();

        tracing::info!("Loaded session '{}' (saved at {})", name, snapshot.saved_at);
        Ok(true)
    }

    /// Enumerate all slots, sorted by name for stable output
    pub async fn list(&self) -> Result<Vec<SessionSummary>> {
        let registry = self.repository.load_sessions().await?;

        let mut sessions: Vec<SessionSummary> = registry
            .iter()
            .map(|(name, snapshot)| SessionSummary {
                name: name.clone(),
                saved_at: snapshot.saved_at.clone(),
                has_primary_data: !snapshot
                    .state
                    .primary_analysis
                    .paths_analysis
                    .insights
                    .is_empty(),
            })
            .collect();
        sessions.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(sessions)
    }
}
