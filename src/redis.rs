use deadpool::managed::{PoolConfig, QueueMode, Timeouts};
use deadpool_redis::{Config, Pool, Runtime};
use redis::AsyncCommands;
use std::env;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{Result, StrategicInsightError};

/// Redis connection manager
#[derive(Clone)]
pub struct RedisManager {
    pool: Arc<Pool>,
}

impl RedisManager {
    /// Create a new Redis manager with connection pool
    pub async fn new() -> Result<Self> {
        // Redis connection configuration from environment variables
        let redis_host = env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string());
        let redis_port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let redis_password = env::var("REDIS_PASSWORD")
            .or_else(|_| env::var("REDIS_PASS")) // Try alternate env var
            .unwrap_or_default();
        let redis_db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        // Validate Redis password for URL compatibility
        if !redis_password.is_empty()
            && (redis_password.contains('@')
                || redis_password.contains(':')
                || redis_password.contains('/'))
        {
            return Err(StrategicInsightError::Configuration(
                "Invalid Redis password format - contains URL-unsafe characters".to_string(),
            ));
        }

        let redis_url = if redis_password.is_empty() {
            format!("redis://{}:{}/{}", redis_host, redis_port, redis_db)
        } else {
            format!(
                "redis://:{}@{}:{}/{}",
                redis_password, redis_host, redis_port, redis_db
            )
        };

        tracing::info!("Connecting to Redis at {}:{} (db: {})", redis_host, redis_port, redis_db);

        let mut cfg = Config::from_url(&redis_url);
        cfg.pool = Some(PoolConfig {
            max_size: 16,
            timeouts: Timeouts {
                wait: Some(Duration::from_secs(5)),
                create: Some(Duration::from_secs(5)),
                recycle: Some(Duration::from_secs(5)),
            },
            queue_mode: QueueMode::Fifo,
        });

        let pool = cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| StrategicInsightError::PoolCreation(e.to_string()))?;

        // Test the connection
        let mut conn = pool.get().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        tracing::info!("Redis connection established");

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Get a connection from the pool
    pub async fn get_connection(&self) -> Result<deadpool_redis::Connection> {
        Ok(self.pool.get().await?)
    }

    /// Get a string value by key
    pub async fn get_string(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;
        let result: Option<String> = conn.get(key).await?;
        Ok(result)
    }

    /// Set a string value by key
    pub async fn set_string(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let _: () = conn.set(key, value).await?;
        Ok(())
    }
}
