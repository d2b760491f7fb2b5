//! Notification resource types.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::schema::{in_range, Validate};

/// An in-app notification for the account holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Opaque notification identifier.
    pub id: String,
    /// Short title.
    pub title: String,
    /// Message body.
    pub body: String,
    /// Whether the user has read it.
    pub read: bool,
    /// RFC 3339 creation timestamp.
    pub created_at: String,
}

/// Response from the mark-all-read action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAllReadReceipt {
    /// How many notifications were marked.
    pub marked: u64,
}

/// Query parameters for listing notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationListParams {
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size, 1 to 100.
    pub page_size: Option<u32>,
    /// Only unread notifications.
    pub unread_only: Option<bool>,
}

impl Validate for NotificationListParams {
    fn check(&self) -> Result<(), ValidationError> {
        if self.page == Some(0) {
            return Err(ValidationError::constraint("page", "pages are 1-based"));
        }
        in_range("page_size", self.page_size, 1, 100)
    }
}
