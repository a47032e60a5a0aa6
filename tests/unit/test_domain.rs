use chrono::Utc;
use monitoring_core::domain::bookmark::entity::{Bookmark, BookmarkType, NotificationChannel};
use monitoring_core::domain::monitoring::entity::{feed_title, FeedType, TargetType};
use monitoring_core::domain::monitoring::detector::DetectorError;
use monitoring_core::infrastructure::retry::RetryPolicy;

fn bookmark(email_enabled: bool, sms_enabled: bool) -> Bookmark {
    Bookmark {
        id: 1,
        user_id: 42,
        r#type: BookmarkType::HsCode,
        target_value: "8471.30".to_string(),
        display_name: "Laptops".to_string(),
        email_enabled,
        sms_enabled,
        monitoring_active: email_enabled || sms_enabled,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

#[test]
fn enabled_channels_reflects_both_flags() {
    assert_eq!(bookmark(true, true).enabled_channels().len(), 2);
    assert_eq!(
        bookmark(true, false).enabled_channels(),
        vec![NotificationChannel::Email]
    );
    assert_eq!(
        bookmark(false, true).enabled_channels(),
        vec![NotificationChannel::Sms]
    );
}

#[test]
fn enabled_channels_empty_when_both_disabled() {
    assert!(bookmark(false, false).enabled_channels().is_empty());
}

#[test]
fn notification_channel_as_str_matches_wire_values() {
    assert_eq!(NotificationChannel::Email.as_str(), "EMAIL");
    assert_eq!(NotificationChannel::Sms.as_str(), "SMS");
}

#[test]
fn target_type_from_bookmark_type_is_lossless() {
    assert_eq!(TargetType::from(BookmarkType::HsCode), TargetType::HsCode);
    assert_eq!(TargetType::from(BookmarkType::Cargo), TargetType::Cargo);
}

#[test]
fn feed_type_variants_beyond_policy_update_are_modeled() {
    let others = [
        FeedType::HsCodeTariffChange,
        FeedType::HsCodeRegulationUpdate,
        FeedType::CargoStatusUpdate,
        FeedType::TradeNews,
    ];
    assert!(others.iter().all(|f| *f != FeedType::PolicyUpdate));
}

#[test]
fn feed_title_wraps_display_name_in_quotes() {
    assert_eq!(
        feed_title("Laptops"),
        "'Laptops'에 대한 새로운 업데이트"
    );
}

#[test]
fn detector_error_retriable_classification() {
    assert!(DetectorError::Timeout.is_retriable());
    assert!(DetectorError::RateLimited.is_retriable());
    assert!(!DetectorError::Malformed("bad json".into()).is_retriable());
    assert!(!DetectorError::Internal("boom".into()).is_retriable());
}

#[test]
fn retry_policy_default_matches_documented_bounds() {
    let policy = RetryPolicy::default();
    assert_eq!(policy.max_attempts, 3);
    assert_eq!(policy.base.as_secs(), 2);
    assert_eq!(policy.cap.as_secs(), 10);
}
