use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::applicator::{ApplyOutcome, InsightApplicator};
use crate::error::Result;
use crate::generator::InsightGenerator;
use crate::models::{FrameworkState, Insight, PrimaryAnalysisPatch, TargetFramework};
use crate::repository::{Repository, StateStorage};

/// Owner of the single live `FrameworkState`.
///
/// All mutation goes through `update` and `apply` (and wholesale replacement
/// by session load, which shares the same lock). Each operation builds the
/// next state on a clone, persists it, then swaps it in, so no intermediate
/// state is ever observable and readers only ever get full snapshots.
pub struct FrameworkStore<R: Repository> {
    state: Arc<RwLock<FrameworkState>>,
    repository: Arc<R>,
}

impl<R: Repository> FrameworkStore<R> {
    /// Load the persisted snapshot, or fall back to the documented default.
    /// Never fails: malformed or unreadable persisted data degrades to the
    /// default state with a warning.
    pub async fn initialize(repository: Arc<R>) -> Self {
        let state = match repository.load_state().await {
            Ok(Some(state)) => state,
            Ok(None) => {
                tracing::info!("No persisted state found, starting from defaults");
                FrameworkState::default_state()
            }
            Err(e) => {
                tracing::warn!("Failed to load persisted state, starting from defaults: {}", e);
                FrameworkState::default_state()
            }
        };

        Self {
            state: Arc::new(RwLock::new(state)),
            repository,
        }
    }

    /// Shared handle to the live state, for the session manager
    pub fn state_handle(&self) -> Arc<RwLock<FrameworkState>> {
        self.state.clone()
    }

    /// Read-only snapshot of the live state
    pub async fn snapshot(&self) -> FrameworkState {
        self.state.read().await.clone()
    }

    /// Replace whichever primary-analysis sub-records the patch carries,
    /// run the insight generator against the new snapshot, append any new
    /// insights, persist, and swap the live state. Returns the new insights.
    pub async fn update(&self, patch: PrimaryAnalysisPatch) -> Result<Vec<Insight>> {
        let current = self.state.read().await.clone();
        let mut next = current.clone();

        if let Some(paths) = patch.paths_analysis {
            next.primary_analysis.paths_analysis = paths;
        }
        if let Some(map) = patch.utility_map {
            next.primary_analysis.utility_map = map;
        }
        next.last_updated = Utc::now().to_rfc3339();

        let new_insights = InsightGenerator::generate(&next.primary_analysis, &current);
        if !new_insights.is_empty() {
            tracing::info!("Update generated {} new insight(s)", new_insights.len());
        }
        next.insights.extend(new_insights.iter().cloned());

        self.repository.save_state(&next).await?;
        *self.state.write().await = next;

        Ok(new_insights)
    }

    /// Materialize an insight into a target framework
    pub async fn apply(&self, insight_id: &str, target: TargetFramework) -> Result<ApplyOutcome> {
        let mut next = self.state.read().await.clone();
        let outcome = InsightApplicator::apply(&mut next, insight_id, target)?;

        self.repository.save_state(&next).await?;
        *self.state.write().await = next;

        Ok(outcome)
    }
}
