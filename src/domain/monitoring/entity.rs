use crate::domain::bookmark::entity::BookmarkType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category of feed row. The wider system also writes
/// `HS_CODE_TARIFF_CHANGE` / `CARGO_STATUS_UPDATE` / `TRADE_NEWS` rows from
/// other pipelines (news ingestion, classification); the monitoring core
/// only ever produces `PolicyUpdate` and must not assume the table is
/// otherwise empty — dedup and read queries are always scoped by
/// `(user_id, target_value, content)`, never by `feed_type` alone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedType {
    HsCodeTariffChange,
    HsCodeRegulationUpdate,
    CargoStatusUpdate,
    TradeNews,
    PolicyUpdate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetType {
    HsCode,
    Cargo,
}

impl From<BookmarkType> for TargetType {
    fn from(value: BookmarkType) -> Self {
        match value {
            BookmarkType::HsCode => TargetType::HsCode,
            BookmarkType::Cargo => TargetType::Cargo,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportanceLevel {
    High,
    Medium,
    Low,
}

/// A durable, user-visible record that something changed for a bookmarked
/// identifier. Never updated by the core once inserted; retention is
/// external.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UpdateFeed {
    pub id: i64,
    pub user_id: i64,
    pub feed_type: FeedType,
    pub target_type: TargetType,
    pub target_value: String,
    pub title: String,
    pub content: String,
    pub importance: ImportanceLevel,
    pub created_at: DateTime<Utc>,
}

/// Builds the human-readable feed title for a monitoring-sourced finding.
pub fn feed_title(display_name: &str) -> String {
    format!("'{}'에 대한 새로운 업데이트", display_name)
}
