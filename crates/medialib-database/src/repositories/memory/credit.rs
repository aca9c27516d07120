//! In-memory credit lookup.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use medialib_core::result::AppResult;
use medialib_entity::credit::CreditRecord;

use crate::repositories::CreditRepository;

/// URL → credit map held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCreditRepository {
    credits: Arc<RwLock<HashMap<String, CreditRecord>>>,
}

impl MemoryCreditRepository {
    /// Create an empty lookup.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CreditRepository for MemoryCreditRepository {
    async fn get(&self, url: &str) -> AppResult<Option<CreditRecord>> {
        Ok(self.credits.read().await.get(url).cloned())
    }

    async fn upsert(&self, url: &str, credit: &str) -> AppResult<CreditRecord> {
        let record = CreditRecord {
            url: url.to_string(),
            credit: credit.to_string(),
            updated_at: Utc::now(),
        };
        self.credits
            .write()
            .await
            .insert(url.to_string(), record.clone());
        Ok(record)
    }

    async fn delete(&self, url: &str) -> AppResult<bool> {
        Ok(self.credits.write().await.remove(url).is_some())
    }
}
