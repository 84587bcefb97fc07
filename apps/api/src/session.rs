//! Short-lived cache of job descriptions, keyed by the session id handed out
//! with each analysis. Lets the MCQ flow reuse the job description without
//! the caller sending it again.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

struct CachedJob {
    job_description: String,
    stored_at: DateTime<Utc>,
}

pub struct JobDescriptionCache {
    ttl: Duration,
    entries: RwLock<HashMap<Uuid, CachedJob>>,
}

impl JobDescriptionCache {
    pub fn new(ttl_minutes: i64) -> Self {
        Self {
            ttl: Duration::minutes(ttl_minutes),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Stores a job description and returns its new session id.
    /// Expired entries are pruned on every insert.
    pub async fn insert(&self, job_description: String) -> Uuid {
        let now = Utc::now();
        let session_id = Uuid::new_v4();
        let mut entries = self.entries.write().await;

        let before = entries.len();
        entries.retain(|_, job| now - job.stored_at < self.ttl);
        if entries.len() < before {
            debug!("Pruned {} expired job descriptions", before - entries.len());
        }

        entries.insert(
            session_id,
            CachedJob {
                job_description,
                stored_at: now,
            },
        );
        session_id
    }

    /// Returns the cached job description, unless it is unknown or expired.
    pub async fn get(&self, session_id: Uuid) -> Option<String> {
        let entries = self.entries.read().await;
        entries
            .get(&session_id)
            .filter(|job| Utc::now() - job.stored_at < self.ttl)
            .map(|job| job.job_description.clone())
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}
