//! Domain models for the Bil24 ticketing platform.
//!
//! Every model follows the same shape: an optional internal `id`, an
//! optional external `bil24_id` correlating to the remote system, a status
//! from a small fixed enum, and validated setters. Construction from a JSON
//! map (`from_value`) applies each recognized key through its setter and
//! ignores unknown keys; `to_value` always emits the full field set with
//! `null` for unset optionals.
//!
//! Validation policy is per-field and deliberately mixed: most fields clamp
//! or silently ignore invalid input, while Venue coordinates and the Order
//! email/amount/currency fields return errors. The split mirrors the remote
//! platform's observable behavior and must stay as-is.

pub mod event;
pub mod order;
pub mod price_category;
pub mod session;
pub mod venue;

pub use event::{Event, EventStatus};
pub use order::{Order, OrderItem, OrderStatus};
pub use price_category::{PriceCategory, PriceCategoryStatus};
pub use session::{Session, SessionStatus};
pub use venue::{Venue, VenueStatus, VenueType};

use chrono::{NaiveDate, NaiveDateTime};
use serde_json::Value;

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` and bare `YYYY-MM-DD` payloads.
pub(crate) fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.naive_utc())
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok())
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

pub(crate) fn format_datetime(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub(crate) fn datetime_value(dt: &Option<NaiveDateTime>) -> Value {
    match dt {
        Some(dt) => Value::String(format_datetime(dt)),
        None => Value::Null,
    }
}

/// Numbers may arrive as JSON numbers or numeric strings.
pub(crate) fn value_to_f64(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

pub(crate) fn value_to_i64(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn datetime_parsing_accepts_common_formats() {
        assert!(parse_datetime("2026-03-01T19:30:00Z").is_some());
        assert!(parse_datetime("2026-03-01 19:30:00").is_some());
        assert!(parse_datetime("2026-03-01").is_some());
        assert!(parse_datetime("next friday").is_none());
    }

    #[test]
    fn numeric_values_accept_strings() {
        assert_eq!(value_to_f64(&json!(25.5)), Some(25.5));
        assert_eq!(value_to_f64(&json!("25.5")), Some(25.5));
        assert_eq!(value_to_i64(&json!("42")), Some(42));
        assert_eq!(value_to_i64(&json!("forty-two")), None);
    }
}
