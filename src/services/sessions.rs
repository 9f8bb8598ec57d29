//! Session-scoped state backed by Redis.
//!
//! The only session state this system keeps is the per-session visit
//! counter for the home view. Counters expire with the session TTL.

use redis::{AsyncCommands, Client};

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct SessionsService {
    client: Client,
    ttl_seconds: u64,
}

impl SessionsService {
    /// Create a new sessions service and verify the connection
    pub async fn new(url: &str, ttl_seconds: u64) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;

        // Test connection
        let mut conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to connect to Redis: {}", e)))?;

        redis::cmd("PING")
            .query_async::<_, String>(&mut conn)
            .await
            .map_err(|e| AppError::Internal(format!("Redis connection test failed: {}", e)))?;

        Ok(Self {
            client,
            ttl_seconds,
        })
    }

    /// Increment the session's visit counter and return the count of
    /// visits before this one. A fresh session reports 0.
    pub async fn record_visit(&self, session_id: &str) -> AppResult<i64> {
        let mut conn = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to get Redis connection: {}", e)))?;

        let key = format!("session:{}:num_visits", session_id);
        let count: i64 = conn
            .incr(&key, 1)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to increment visit counter: {}", e)))?;

        // Refresh the session lifetime on every visit
        let _: () = conn
            .expire(&key, self.ttl_seconds as i64)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to set session expiry: {}", e)))?;

        Ok(count - 1)
    }
}
