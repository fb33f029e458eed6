use rmcp::{
    handler::server::{router::tool::ToolRouter, tool::Parameters},
    model::{CallToolResult, Content, ErrorData, ServerCapabilities, ServerInfo},
    ServerHandler,
};
use rmcp_macros::{tool, tool_handler, tool_router};
use std::future::Future;
use std::sync::Arc;
use tracing;

use crate::error::StrategicInsightError;
use crate::handlers::ToolHandlers;
use crate::models::{
    ApplyInsightParams, GetStateParams, ListInsightsParams, ListSessionsParams, LoadSessionParams,
    SaveSessionParams, UpdateAnalysisParams,
};
use crate::rate_limit::RateLimiter;
use crate::redis::RedisManager;
use crate::repository::RedisRepository;
use crate::validation::InputValidator;

/// Main service struct for the StrategicInsight MCP server
#[derive(Clone)]
pub struct StrategicInsightService {
    tool_router: ToolRouter<Self>,
    handlers: Arc<ToolHandlers<RedisRepository>>,
    rate_limiter: Arc<RateLimiter>,
}

impl StrategicInsightService {
    /// Create a new service instance
    pub async fn new() -> Result<Self, StrategicInsightError> {
        tracing::info!("Initializing StrategicInsight service");

        let redis_manager = Arc::new(RedisManager::new().await?);
        let repository = Arc::new(RedisRepository::new(redis_manager));
        let validator = Arc::new(InputValidator::new());

        // 100 requests per minute per tool is plenty for an interactive editor
        let rate_limiter = Arc::new(RateLimiter::new(100, 60));

        let handlers = Arc::new(ToolHandlers::new(repository, validator).await);

        Ok(Self {
            tool_router: Self::tool_router(),
            handlers,
            rate_limiter,
        })
    }

    async fn guard(&self, tool: &str) -> Result<(), ErrorData> {
        if let Err(e) = self.rate_limiter.check_rate_limit(tool).await {
            tracing::warn!("Rate limit hit for {}: {}", tool, e);
            return Err(ErrorData::invalid_params(
                "Rate limit exceeded. Please slow down your requests.".to_string(),
                None,
            ));
        }
        Ok(())
    }

    fn to_call_result<T: serde::Serialize>(
        result: Result<T, StrategicInsightError>,
        tool: &str,
    ) -> Result<CallToolResult, ErrorData> {
        match result {
            Ok(response) => {
                let content = Content::json(response).map_err(|e| {
                    ErrorData::internal_error(format!("Failed to create JSON content: {}", e), None)
                })?;
                Ok(CallToolResult::success(vec![content]))
            }
            // Referential and validation errors are caller bugs, surfaced as
            // invalid params rather than internal failures
            Err(
                e @ (StrategicInsightError::InsightNotFound(_)
                | StrategicInsightError::InvalidTarget { .. }
                | StrategicInsightError::Validation { .. }),
            ) => {
                tracing::warn!("{} rejected: {}", tool, e);
                Err(ErrorData::invalid_params(e.to_string(), None))
            }
            Err(e) => {
                tracing::error!("{} error: {}", tool, e);
                Err(ErrorData::internal_error(e.to_string(), None))
            }
        }
    }
}

#[tool_router]
impl StrategicInsightService {
    #[tool(
        description = "Replace parts of the primary analysis (paths analysis and/or utility map) and derive any implied cross-framework insights"
    )]
    pub async fn bo_update_analysis(
        &self,
        params: Parameters<UpdateAnalysisParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.guard("bo_update_analysis").await?;
        Self::to_call_result(
            self.handlers.update_analysis(params.0).await,
            "bo_update_analysis",
        )
    }

    #[tool(
        description = "Materialize an insight's recommendations into a target framework (marketing, hr, or process) and record the application"
    )]
    pub async fn bo_apply_insight(
        &self,
        params: Parameters<ApplyInsightParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.guard("bo_apply_insight").await?;
        Self::to_call_result(
            self.handlers.apply_insight(params.0).await,
            "bo_apply_insight",
        )
    }

    #[tool(description = "Read a full snapshot of the framework state, including the insight ledger")]
    pub async fn bo_get_state(
        &self,
        _params: Parameters<GetStateParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.guard("bo_get_state").await?;
        Self::to_call_result(self.handlers.get_state().await, "bo_get_state")
    }

    #[tool(description = "List all insights with their audit trails")]
    pub async fn bo_list_insights(
        &self,
        _params: Parameters<ListInsightsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.guard("bo_list_insights").await?;
        Self::to_call_result(self.handlers.list_insights().await, "bo_list_insights")
    }

    #[tool(description = "Save the current state into a named session slot, overwriting any existing slot")]
    pub async fn bo_save_session(
        &self,
        params: Parameters<SaveSessionParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.guard("bo_save_session").await?;
        Self::to_call_result(self.handlers.save_session(params.0).await, "bo_save_session")
    }

    #[tool(
        description = "Restore a named session snapshot; reports loaded=false when the slot does not exist"
    )]
    pub async fn bo_load_session(
        &self,
        params: Parameters<LoadSessionParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.guard("bo_load_session").await?;
        Self::to_call_result(self.handlers.load_session(params.0).await, "bo_load_session")
    }

    #[tool(description = "List saved sessions with timestamps and whether they contain primary-analysis data")]
    pub async fn bo_list_sessions(
        &self,
        _params: Parameters<ListSessionsParams>,
    ) -> Result<CallToolResult, ErrorData> {
        self.guard("bo_list_sessions").await?;
        Self::to_call_result(self.handlers.list_sessions().await, "bo_list_sessions")
    }
}

#[tool_handler]
impl ServerHandler for StrategicInsightService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: rmcp::model::ProtocolVersion::V_2024_11_05,
            server_info: rmcp::model::Implementation {
                name: "strategic-insight".into(),
                version: env!("CARGO_PKG_VERSION").into(),
            },
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            instructions: Some(
                "Cross-framework insight propagation engine for strategic planning data".into(),
            ),
        }
    }
}
