//! Question model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Question entity. `author_id` is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New question creation payload
#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub author_id: Uuid,
    pub content: String,
}
