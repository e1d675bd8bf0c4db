//! One unit of work

use qtc_domain::{NotificationId, RawDocument};
use serde_json::Value;

/// An inbound email with its attachments, as delivered by the document source
#[derive(Debug, Clone)]
pub struct Notification {
    /// Correlation id for log lines of this unit of work
    pub id: NotificationId,

    /// Graph message JSON
    pub message: Value,

    /// Attachments in delivery order
    pub attachments: Vec<RawDocument>,
}

impl Notification {
    /// Create a notification with a fresh id
    pub fn new(message: Value, attachments: Vec<RawDocument>) -> Self {
        Self {
            id: NotificationId::new(),
            message,
            attachments,
        }
    }
}
