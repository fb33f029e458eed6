// Test mock implementation that doesn't require mockall
use async_trait::async_trait;
use std::sync::Mutex;

use super::{SessionStorage, StateStorage};
use crate::error::{Result, StrategicInsightError};
use crate::models::{FrameworkState, SessionRegistry};

/// In-memory repository for store and session tests. The `failing`
/// constructor simulates an unavailable persistence collaborator.
pub struct MockRepository {
    state: Mutex<Option<FrameworkState>>,
    sessions: Mutex<SessionRegistry>,
    fail: bool,
}

impl MockRepository {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(None),
            sessions: Mutex::new(SessionRegistry::new()),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            state: Mutex::new(None),
            sessions: Mutex::new(SessionRegistry::new()),
            fail: true,
        }
    }

    fn check(&self) -> Result<()> {
        if self.fail {
            Err(StrategicInsightError::Persistence(
                "mock persistence unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl StateStorage for MockRepository {
    async fn load_state(&self) -> Result<Option<FrameworkState>> {
        self.check()?;
        Ok(self.state.lock().unwrap().clone())
    }

    async fn save_state(&self, state: &FrameworkState) -> Result<()> {
        self.check()?;
        *self.state.lock().unwrap() = Some(state.clone());
        Ok(())
    }
}

#[async_trait]
impl SessionStorage for MockRepository {
    async fn load_sessions(&self) -> Result<SessionRegistry> {
        self.check()?;
        Ok(self.sessions.lock().unwrap().clone())
    }

    async fn save_sessions(&self, registry: &SessionRegistry) -> Result<()> {
        self.check()?;
        *self.sessions.lock().unwrap() = registry.clone();
        Ok(())
    }
}
