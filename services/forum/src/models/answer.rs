//! Answer model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Answer entity. `author_id` and `question_id` are immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: Uuid,
    pub author_id: Uuid,
    pub question_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New answer creation payload
#[derive(Debug, Clone)]
pub struct NewAnswer {
    pub author_id: Uuid,
    pub question_id: Uuid,
    pub content: String,
}
