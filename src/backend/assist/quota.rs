//! AI-assist quota keys and usage lookups.
//!
//! A counter is keyed by (user, session, UTC calendar day). A new day is a new
//! key, so counters reset without any cleanup job.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::backend::collab::store::{SessionStore, StoreError};
use crate::shared::AssistUsage;

/// Composite key of one assist counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UsageKey {
    pub user_id: Uuid,
    pub session_id: Uuid,
    pub day: NaiveDate,
}

impl UsageKey {
    pub fn new(user_id: Uuid, session_id: Uuid, day: NaiveDate) -> Self {
        Self { user_id, session_id, day }
    }

    /// Key for the current UTC day
    pub fn today(user_id: Uuid, session_id: Uuid) -> Self {
        Self::new(user_id, session_id, current_day())
    }
}

/// Current UTC calendar day
pub fn current_day() -> NaiveDate {
    Utc::now().date_naive()
}

/// Read the usage for a key against a daily limit
pub async fn usage_for(
    store: &dyn SessionStore,
    key: &UsageKey,
    limit: u32,
) -> Result<AssistUsage, StoreError> {
    let used = store.assist_count(key).await?;
    Ok(AssistUsage::new(key.day, used, limit))
}
