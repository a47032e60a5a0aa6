use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Success,
    AlreadyRunning,
    ServiceUnavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LockStatus {
    Acquired,
    NotAcquired,
}

/// The trigger surface's response shape.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub status: RunStatus,
    pub monitored_bookmarks: u32,
    pub updates_found: u32,
    pub lock_status: LockStatus,
}

impl RunSummary {
    pub fn already_running() -> Self {
        Self {
            status: RunStatus::AlreadyRunning,
            monitored_bookmarks: 0,
            updates_found: 0,
            lock_status: LockStatus::NotAcquired,
        }
    }

    pub fn success(monitored_bookmarks: u32, updates_found: u32) -> Self {
        Self {
            status: RunStatus::Success,
            monitored_bookmarks,
            updates_found,
            lock_status: LockStatus::Acquired,
        }
    }
}
