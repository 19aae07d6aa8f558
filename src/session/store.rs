// Per-user key/value storage backends

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Errors surfaced by a store backend.
///
/// The tracker never produces these itself; they represent infrastructure
/// failure in whatever backs the store.
#[derive(Debug, Clone)]
pub enum StoreError {
    ConnectionError(String),
    InvalidData(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::ConnectionError(msg) => write!(f, "Connection error: {}", msg),
            StoreError::InvalidData(msg) => write!(f, "Invalid data: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Trait for per-user key/value storage.
///
/// Any backend that can get, set, and delete one string value per
/// (user, key) pair is sufficient; the tracker needs nothing stronger.
/// Implementations serialize individual operations but are not required
/// to provide cross-operation transactions.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Read a value for a user, or `None` when unset.
    async fn get(&self, user_id: &str, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value for a user, creating or overwriting.
    async fn set(&self, user_id: &str, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a value for a user; no-op when absent.
    async fn delete(&self, user_id: &str, key: &str) -> Result<(), StoreError>;
}

/// In-memory user store backed by a HashMap behind an RwLock
pub struct MemoryUserStore {
    entries: Arc<RwLock<HashMap<String, HashMap<String, String>>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for MemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get(&self, user_id: &str, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries.get(user_id).and_then(|values| values.get(key)).cloned())
    }

    async fn set(&self, user_id: &str, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        entries
            .entry(user_id.to_string())
            .or_default()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, user_id: &str, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;

        let now_empty = match entries.get_mut(user_id) {
            Some(values) => {
                values.remove(key);
                values.is_empty()
            }
            None => false,
        };

        if now_empty {
            entries.remove(user_id);
        }

        Ok(())
    }
}
