use std::sync::Arc;

use crate::error::Result;
use crate::models::{
    ApplyInsightParams, ApplyResponse, FrameworkState, InsightListResponse, InsightSummary,
    LoadSessionParams, LoadSessionResponse, PrimaryAnalysisPatch, SaveSessionParams,
    SaveSessionResponse, SessionListResponse, UpdateAnalysisParams, UpdateResponse,
};
use crate::repository::Repository;
use crate::sessions::SessionManager;
use crate::store::FrameworkStore;
use crate::validation::InputValidator;

/// Handler for MCP tool operations
pub struct ToolHandlers<R: Repository> {
    store: FrameworkStore<R>,
    sessions: SessionManager<R>,
    validator: Arc<InputValidator>,
}

impl<R: Repository> ToolHandlers<R> {
    pub async fn new(repository: Arc<R>, validator: Arc<InputValidator>) -> Self {
        let store = FrameworkStore::initialize(repository.clone()).await;
        let sessions = SessionManager::new(store.state_handle(), repository);

        Self {
            store,
            sessions,
            validator,
        }
    }

    /// Handle bo_update_analysis tool
    pub async fn update_analysis(&self, params: UpdateAnalysisParams) -> Result<UpdateResponse> {
        if let Some(paths) = &params.paths_analysis {
            self.validator.validate_paths_analysis(paths)?;
        }
        if let Some(map) = &params.utility_map {
            self.validator.validate_utility_map(map)?;
        }

        tracing::info!(
            "Updating primary analysis (paths: {}, utility map: {})",
            params.paths_analysis.is_some(),
            params.utility_map.is_some()
        );

        let new_insights = self
            .store
            .update(PrimaryAnalysisPatch {
                paths_analysis: params.paths_analysis,
                utility_map: params.utility_map,
            })
            .await?;

        let state = self.store.snapshot().await;
        Ok(UpdateResponse {
            status: "updated".to_string(),
            new_insights: new_insights.iter().map(InsightSummary::from).collect(),
            total_insights: state.insights.len(),
            last_updated: state.last_updated,
        })
    }

    /// Handle bo_apply_insight tool
    pub async fn apply_insight(&self, params: ApplyInsightParams) -> Result<ApplyResponse> {
        tracing::info!(
            "Applying insight {} to {}",
            params.insight_id,
            params.target_framework
        );

        let outcome = self
            .store
            .apply(&params.insight_id, params.target_framework)
            .await?;

        Ok(ApplyResponse {
            status: "applied".to_string(),
            insight_id: outcome.insight_id,
            target_framework: outcome.target,
            records_created: outcome.records_created,
            applied_at: outcome.applied_at,
        })
    }

    /// Handle bo_get_state tool
    pub async fn get_state(&self) -> Result<FrameworkState> {
        Ok(self.store.snapshot().await)
    }

    /// Handle bo_list_insights tool
    pub async fn list_insights(&self) -> Result<InsightListResponse> {
        let state = self.store.snapshot().await;
        Ok(InsightListResponse {
            total: state.insights.len(),
            insights: state.insights,
        })
    }

    /// Handle bo_save_session tool
    pub async fn save_session(&self, params: SaveSessionParams) -> Result<SaveSessionResponse> {
        self.validator.validate_session_name(&params.name)?;

        let saved_at = self.sessions.save(&params.name).await?;
        Ok(SaveSessionResponse {
            status: "saved".to_string(),
            name: params.name,
            saved_at,
        })
    }

    /// Handle bo_load_session tool
    pub async fn load_session(&self, params: LoadSessionParams) -> Result<LoadSessionResponse> {
        self.validator.validate_session_name(&params.name)?;

        let loaded = self.sessions.load(&params.name).await?;
        Ok(LoadSessionResponse {
            loaded,
            name: params.name,
        })
    }

    /// Handle bo_list_sessions tool
    pub async fn list_sessions(&self) -> Result<SessionListResponse> {
        let sessions = self.sessions.list().await?;
        Ok(SessionListResponse {
            total: sessions.len(),
            sessions,
        })
    }
}
