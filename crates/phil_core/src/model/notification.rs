//! Notification events produced by the reminder pipeline.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One entry of the notification feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    /// Time-ordered id (UUID v7).
    pub id: String,
    pub message: String,
    pub produced_at: NaiveDateTime,
}

impl NotificationEvent {
    pub fn new(message: impl Into<String>, produced_at: NaiveDateTime) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            message: message.into(),
            produced_at,
        }
    }

    /// Short `HH:MM` label shown next to the message.
    pub fn time_label(&self) -> String {
        self.produced_at.format("%H:%M").to_string()
    }
}
