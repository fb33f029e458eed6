use async_trait::async_trait;
use std::sync::Arc;

use super::{SessionStorage, StateStorage};
use crate::error::Result;
use crate::models::{FrameworkState, SessionRegistry};
use crate::redis::RedisManager;

/// Well-known key holding the live framework-state snapshot
const STATE_KEY: &str = "strategy:framework_state";
/// Well-known key holding the session registry
const SESSIONS_KEY: &str = "strategy:sessions";

/// Redis implementation of the repository traits. Values are JSON strings
/// mirroring the in-memory structures; no transactional guarantees beyond
/// what a single SET provides. Malformed persisted data is logged and
/// degraded rather than surfaced as an error.
pub struct RedisRepository {
    redis: Arc<RedisManager>,
}

impl RedisRepository {
    pub fn new(redis: Arc<RedisManager>) -> Self {
        Self { redis }
    }
}

#[async_trait]
impl StateStorage for RedisRepository {
    async fn load_state(&self) -> Result<Option<FrameworkState>> {
        let Some(raw) = self.redis.get_string(STATE_KEY).await? else {
            return Ok(None);
        };

        match serde_json::from_str::<FrameworkState>(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                tracing::warn!("Malformed persisted state under '{}': {}", STATE_KEY, e);
                Ok(None)
            }
        }
    }

    async fn save_state(&self, state: &FrameworkState) -> Result<()> {
        let json = serde_json::to_string(state)?;
        self.redis.set_string(STATE_KEY, &json).await?;
        tracing::debug!("Persisted framework state ({} bytes)", json.len());
        Ok(())
    }
}

#[async_trait]
impl SessionStorage for RedisRepository {
    async fn load_sessions(&self) -> Result<SessionRegistry> {
        let Some(raw) = self.redis.get_string(SESSIONS_KEY).await? else {
            return Ok(SessionRegistry::new());
        };

        match serde_json::from_str::<SessionRegistry>(&raw) {
            Ok(registry) => Ok(registry),
            Err(e) => {
                tracing::warn!("Malformed session registry under '{}': {}", SESSIONS_KEY, e);
                Ok(SessionRegistry::new())
            }
        }
    }

    async fn save_sessions(&self, registry: &SessionRegistry) -> Result<()> {
        let json = serde_json::to_string(registry)?;
        self.redis.set_string(SESSIONS_KEY, &json).await?;
        tracing::debug!("Persisted session registry ({} slots)", registry.len());
        Ok(())
    }
}
