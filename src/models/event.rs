use super::{datetime_value, parse_datetime, value_to_f64, value_to_i64};
use chrono::NaiveDateTime;
use serde_json::{json, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventStatus {
    #[default]
    Draft,
    Published,
    Cancelled,
    SoldOut,
    Active,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Draft => "draft",
            EventStatus::Published => "published",
            EventStatus::Cancelled => "cancelled",
            EventStatus::SoldOut => "sold_out",
            EventStatus::Active => "active",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(EventStatus::Draft),
            "published" => Some(EventStatus::Published),
            "cancelled" => Some(EventStatus::Cancelled),
            "sold_out" => Some(EventStatus::SoldOut),
            "active" => Some(EventStatus::Active),
            _ => None,
        }
    }
}

/// A ticketed event as exposed by the remote platform.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    id: Option<i64>,
    bil24_id: Option<i64>,
    title: String,
    description: String,
    start_date: Option<NaiveDateTime>,
    end_date: Option<NaiveDateTime>,
    venue: String,
    price: f64,
    currency: String,
    status: EventStatus,
}

impl Default for Event {
    fn default() -> Self {
        Self {
            id: None,
            bil24_id: None,
            title: String::new(),
            description: String::new(),
            start_date: None,
            end_date: None,
            venue: String::new(),
            price: 0.0,
            currency: "RUB".to_string(),
            status: EventStatus::default(),
        }
    }
}

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an event from a JSON map. Unknown keys are ignored; every
    /// recognized key goes through its validated setter.
    pub fn from_value(data: &Value) -> Self {
        let mut event = Self::default();
        if let Some(map) = data.as_object() {
            for (key, value) in map {
                event.apply(key, value);
            }
        }
        event
    }

    fn apply(&mut self, key: &str, value: &Value) {
        match key {
            "id" => self.id = value_to_i64(value),
            "bil24_id" => self.bil24_id = value_to_i64(value),
            "title" => {
                if let Some(s) = value.as_str() {
                    self.set_title(s);
                }
            }
            "description" => {
                if let Some(s) = value.as_str() {
                    self.set_description(s);
                }
            }
            "start_date" => {
                if let Some(s) = value.as_str() {
                    self.set_start_date(parse_datetime(s));
                }
            }
            "end_date" => {
                if let Some(s) = value.as_str() {
                    self.set_end_date(parse_datetime(s));
                }
            }
            "venue" => {
                if let Some(s) = value.as_str() {
                    self.set_venue(s);
                }
            }
            "price" => {
                if let Some(p) = value_to_f64(value) {
                    self.set_price(p);
                }
            }
            "currency" => {
                if let Some(s) = value.as_str() {
                    self.set_currency(s);
                }
            }
            "status" => {
                if let Some(s) = value.as_str() {
                    self.set_status(s);
                }
            }
            _ => {}
        }
    }

    /// Full fixed field set, `null` for unset optionals.
    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "bil24_id": self.bil24_id,
            "title": self.title,
            "description": self.description,
            "start_date": datetime_value(&self.start_date),
            "end_date": datetime_value(&self.end_date),
            "venue": self.venue,
            "price": self.price,
            "currency": self.currency,
            "status": self.status.as_str(),
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn set_id(&mut self, id: Option<i64>) {
        self.id = id;
    }

    pub fn bil24_id(&self) -> Option<i64> {
        self.bil24_id
    }

    pub fn set_bil24_id(&mut self, id: Option<i64>) {
        self.bil24_id = id;
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: &str) {
        self.title = title.trim().to_string();
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: &str) {
        self.description = description.to_string();
    }

    pub fn start_date(&self) -> Option<NaiveDateTime> {
        self.start_date
    }

    pub fn set_start_date(&mut self, date: Option<NaiveDateTime>) {
        self.start_date = date;
    }

    pub fn end_date(&self) -> Option<NaiveDateTime> {
        self.end_date
    }

    pub fn set_end_date(&mut self, date: Option<NaiveDateTime>) {
        self.end_date = date;
    }

    pub fn venue(&self) -> &str {
        &self.venue
    }

    pub fn set_venue(&mut self, venue: &str) {
        self.venue = venue.trim().to_string();
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    /// Negative prices clamp to zero, no error raised.
    pub fn set_price(&mut self, price: f64) {
        self.price = price.max(0.0);
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Normalized to upper case.
    pub fn set_currency(&mut self, currency: &str) {
        self.currency = currency.trim().to_uppercase();
    }

    pub fn status(&self) -> EventStatus {
        self.status
    }

    /// Unknown status strings leave the current value unchanged.
    pub fn set_status(&mut self, status: &str) {
        if let Some(status) = EventStatus::parse(status) {
            self.status = status;
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.start_date {
            Some(date) => write!(f, "{} ({})", self.title, date.format("%Y-%m-%d")),
            None => write!(f, "{} (no date)", self.title),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn negative_price_clamps_to_zero() {
        let mut event = Event::new();
        event.set_price(-10.0);
        assert_eq!(event.price(), 0.0);

        event.set_price(25.5);
        assert_eq!(event.price(), 25.5);
    }

    #[test]
    fn currency_is_uppercased() {
        let mut event = Event::new();
        event.set_currency("usd");
        assert_eq!(event.currency(), "USD");
    }

    #[test]
    fn invalid_status_is_ignored() {
        let mut event = Event::new();
        event.set_status("published");
        event.set_status("imaginary");
        assert_eq!(event.status(), EventStatus::Published);
    }

    #[test]
    fn from_value_ignores_unknown_keys() {
        let event = Event::from_value(&json!({
            "title": "Hamlet",
            "price": -5.0,
            "currency": "eur",
            "status": "active",
            "wp_post_id": 991,
        }));
        assert_eq!(event.title(), "Hamlet");
        assert_eq!(event.price(), 0.0);
        assert_eq!(event.currency(), "EUR");
        assert_eq!(event.status(), EventStatus::Active);
    }

    #[test]
    fn value_roundtrip_preserves_fields() {
        let original = Event::from_value(&json!({
            "id": 3,
            "bil24_id": 707,
            "title": "Hamlet",
            "description": "A tragedy",
            "start_date": "2026-03-01 19:30:00",
            "venue": "Globe",
            "price": 45.0,
            "currency": "GBP",
            "status": "published",
        }));
        let restored = Event::from_value(&original.to_value());
        assert_eq!(original, restored);
        assert_eq!(restored.to_value()["end_date"], Value::Null);
    }

    #[test]
    fn display_includes_title_and_date() {
        let event = Event::from_value(&json!({
            "title": "Hamlet",
            "start_date": "2026-03-01 19:30:00",
        }));
        assert_eq!(event.to_string(), "Hamlet (2026-03-01)");
    }
}
