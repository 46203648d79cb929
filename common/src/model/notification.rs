use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationType {
    LowStock,
    Expiring,
    Reorder,
    Critical,
    Info,
}

/// A dashboard notification as shown in the header bell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub read: bool,
    pub created_at: DateTime<Utc>,
    pub link: Option<String>,
}

/// Notification content before it is given an id and a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub link: Option<String>,
}

impl NewNotification {
    /// Stamps the notification as unread with the given id and creation time.
    pub fn into_notification(self, id: String, created_at: DateTime<Utc>) -> Notification {
        Notification {
            id,
            title: self.title,
            message: self.message,
            kind: self.kind,
            read: false,
            created_at,
            link: self.link,
        }
    }
}
