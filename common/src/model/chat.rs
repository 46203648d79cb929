use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One question/answer exchange with the assistant, as stored in `chat_history`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEntry {
    pub id: String,
    pub user_id: String,
    pub query: String,
    pub response: String,
    pub created_at: Option<DateTime<Utc>>,
}
