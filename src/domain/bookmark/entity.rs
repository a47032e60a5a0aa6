use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier kind a bookmark tracks. Mirrors the `bookmark_type` enum owned
/// by the bookmarks service; the core only ever reads it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookmarkType {
    HsCode,
    Cargo,
}

/// A user's persistent interest in a trade identifier, paired with
/// per-channel notification opt-ins.
///
/// Ownership of this table belongs to another service. The core treats it
/// as read-only and only re-reads a single row, inside the persister's
/// transaction, to close the window between the run's initial load and
/// the actual insert.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Bookmark {
    pub id: i64,
    pub user_id: i64,
    pub r#type: BookmarkType,
    pub target_value: String,
    pub display_name: String,
    pub email_enabled: bool,
    pub sms_enabled: bool,
    pub monitoring_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Bookmark {
    /// Channels this bookmark currently wants notifications on.
    ///
    /// Derived directly from the bookmark's own flags. A future, richer
    /// notification policy (quiet hours, digest batching) can replace
    /// this without touching any caller.
    pub fn enabled_channels(&self) -> Vec<NotificationChannel> {
        let mut channels = Vec::with_capacity(2);
        if self.email_enabled {
            channels.push(NotificationChannel::Email);
        }
        if self.sms_enabled {
            channels.push(NotificationChannel::Sms);
        }
        channels
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum NotificationChannel {
    Email,
    Sms,
}

impl NotificationChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationChannel::Email => "EMAIL",
            NotificationChannel::Sms => "SMS",
        }
    }
}
