use thiserror::Error;

/// Custom error types for StrategicInsight
#[derive(Error, Debug)]
pub enum StrategicInsightError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Connection pool error: {0}")]
    Pool(#[from] deadpool_redis::PoolError),

    #[error("Connection pool creation error: {0}")]
    PoolCreation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {field} - {reason}")]
    Validation { field: String, reason: String },

    #[error("Insight not found: {0}")]
    InsightNotFound(String),

    #[error("Framework '{target}' is not a valid target for insight {insight_id}")]
    InvalidTarget { insight_id: String, target: String },

    #[error("Persistence unavailable: {0}")]
    Persistence(String),

    #[error("Rate limit exceeded")]
    RateLimit,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Convert ValidationError to StrategicInsightError
impl From<crate::validation::ValidationError> for StrategicInsightError {
    fn from(err: crate::validation::ValidationError) -> Self {
        StrategicInsightError::Validation {
            field: match &err {
                crate::validation::ValidationError::InvalidSessionName { .. } => {
                    "session_name".to_string()
                }
                crate::validation::ValidationError::WrongStageCount { .. } => "stages".to_string(),
                crate::validation::ValidationError::UnexpectedStage { .. } => "stages".to_string(),
                crate::validation::ValidationError::ScoreOutOfRange { .. } => "scores".to_string(),
                crate::validation::ValidationError::EntryTooLong { .. } => "entry".to_string(),
                crate::validation::ValidationError::EmptyEntry => "entry".to_string(),
            },
            reason: err.to_string(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, StrategicInsightError>;
