use super::{datetime_value, parse_datetime, value_to_f64, value_to_i64};
use chrono::NaiveDateTime;
use serde_json::{json, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Scheduled,
    Active,
    Cancelled,
    Completed,
    SoldOut,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Scheduled => "scheduled",
            SessionStatus::Active => "active",
            SessionStatus::Cancelled => "cancelled",
            SessionStatus::Completed => "completed",
            SessionStatus::SoldOut => "sold_out",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "scheduled" => Some(SessionStatus::Scheduled),
            "active" => Some(SessionStatus::Active),
            "cancelled" => Some(SessionStatus::Cancelled),
            "completed" => Some(SessionStatus::Completed),
            "sold_out" => Some(SessionStatus::SoldOut),
            _ => None,
        }
    }
}

/// A scheduled occurrence of an event at a venue, with its own seat
/// inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: Option<i64>,
    bil24_id: Option<i64>,
    event_id: Option<i64>,
    venue_id: Option<i64>,
    start_time: Option<NaiveDateTime>,
    end_time: Option<NaiveDateTime>,
    capacity: u32,
    available_seats: u32,
    reserved_seats: u32,
    sold_seats: u32,
    base_price: f64,
    currency: String,
    status: SessionStatus,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            id: None,
            bil24_id: None,
            event_id: None,
            venue_id: None,
            start_time: None,
            end_time: None,
            capacity: 0,
            available_seats: 0,
            reserved_seats: 0,
            sold_seats: 0,
            base_price: 0.0,
            currency: "RUB".to_string(),
            status: SessionStatus::default(),
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(data: &Value) -> Self {
        let mut session = Self::default();
        if let Some(map) = data.as_object() {
            for (key, value) in map {
                session.apply(key, value);
            }
        }
        session
    }

    fn apply(&mut self, key: &str, value: &Value) {
        match key {
            "id" => self.id = value_to_i64(value),
            "bil24_id" => self.bil24_id = value_to_i64(value),
            "event_id" => self.event_id = value_to_i64(value),
            "venue_id" => self.venue_id = value_to_i64(value),
            "start_time" => {
                if let Some(s) = value.as_str() {
                    self.set_start_time(parse_datetime(s));
                }
            }
            "end_time" => {
                if let Some(s) = value.as_str() {
                    self.set_end_time(parse_datetime(s));
                }
            }
            "capacity" => {
                if let Some(c) = value_to_i64(value) {
                    self.set_capacity(c);
                }
            }
            "available_seats" => {
                if let Some(n) = value_to_i64(value) {
                    self.set_available_seats(n);
                }
            }
            "reserved_seats" => {
                if let Some(n) = value_to_i64(value) {
                    self.set_reserved_seats(n);
                }
            }
            "sold_seats" => {
                if let Some(n) = value_to_i64(value) {
                    self.set_sold_seats(n);
                }
            }
            "base_price" => {
                if let Some(p) = value_to_f64(value) {
                    self.set_base_price(p);
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

    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "bil24_id": self.bil24_id,
            "event_id": self.event_id,
            "venue_id": self.venue_id,
            "start_time": datetime_value(&self.start_time),
            "end_time": datetime_value(&self.end_time),
            "capacity": self.capacity,
            "available_seats": self.available_seats,
            "reserved_seats": self.reserved_seats,
            "sold_seats": self.sold_seats,
            "base_price": self.base_price,
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

    pub fn event_id(&self) -> Option<i64> {
        self.event_id
    }

    pub fn set_event_id(&mut self, id: Option<i64>) {
        self.event_id = id;
    }

    pub fn venue_id(&self) -> Option<i64> {
        self.venue_id
    }

    pub fn set_venue_id(&mut self, id: Option<i64>) {
        self.venue_id = id;
    }

    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.start_time
    }

    pub fn set_start_time(&mut self, time: Option<NaiveDateTime>) {
        self.start_time = time;
    }

    pub fn end_time(&self) -> Option<NaiveDateTime> {
        self.end_time
    }

    pub fn set_end_time(&mut self, time: Option<NaiveDateTime>) {
        self.end_time = time;
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn set_capacity(&mut self, capacity: i64) {
        self.capacity = capacity.max(0) as u32;
    }

    pub fn available_seats(&self) -> u32 {
        self.available_seats
    }

    /// Clamps below zero. Driving availability to zero while the session
    /// is active flips the status to sold out.
    pub fn set_available_seats(&mut self, seats: i64) {
        self.available_seats = seats.max(0) as u32;
        self.sync_sold_out();
    }

    pub fn reserved_seats(&self) -> u32 {
        self.reserved_seats
    }

    pub fn set_reserved_seats(&mut self, seats: i64) {
        self.reserved_seats = seats.max(0) as u32;
    }

    pub fn sold_seats(&self) -> u32 {
        self.sold_seats
    }

    pub fn set_sold_seats(&mut self, seats: i64) {
        self.sold_seats = seats.max(0) as u32;
    }

    /// Updates all three counters at once, applying the same clamping and
    /// sold-out transition as the individual setters.
    pub fn update_seat_counts(&mut self, available: i64, reserved: i64, sold: i64) {
        self.available_seats = available.max(0) as u32;
        self.reserved_seats = reserved.max(0) as u32;
        self.sold_seats = sold.max(0) as u32;
        self.sync_sold_out();
    }

    fn sync_sold_out(&mut self) {
        if self.available_seats == 0 && self.status == SessionStatus::Active {
            self.status = SessionStatus::SoldOut;
        }
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn set_base_price(&mut self, price: f64) {
        self.base_price = price.max(0.0);
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn set_currency(&mut self, currency: &str) {
        self.currency = currency.trim().to_uppercase();
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn set_status(&mut self, status: &str) {
        if let Some(status) = SessionStatus::parse(status) {
            self.status = status;
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self
            .id
            .map_or_else(|| "new".to_string(), |id| id.to_string());
        match self.start_time {
            Some(start) => write!(f, "Session {} ({})", id, start.format("%Y-%m-%d %H:%M")),
            None => write!(f, "Session {} (unscheduled)", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn seat_counters_clamp() {
        let mut session = Session::new();
        session.set_available_seats(-5);
        session.set_reserved_seats(-1);
        session.set_sold_seats(-2);
        assert_eq!(session.available_seats(), 0);
        assert_eq!(session.reserved_seats(), 0);
        assert_eq!(session.sold_seats(), 0);
    }

    #[test]
    fn exhausting_availability_marks_active_session_sold_out() {
        let mut session = Session::new();
        session.set_status("active");
        session.set_capacity(100);
        session.update_seat_counts(0, 0, 100);
        assert_eq!(session.status(), SessionStatus::SoldOut);
        assert_eq!(session.sold_seats(), 100);
    }

    #[test]
    fn scheduled_session_keeps_status_at_zero_availability() {
        let mut session = Session::new();
        session.update_seat_counts(0, 0, 50);
        assert_eq!(session.status(), SessionStatus::Scheduled);
    }

    #[test]
    fn negative_base_price_clamps() {
        let mut session = Session::new();
        session.set_base_price(-9.99);
        assert_eq!(session.base_price(), 0.0);
    }

    #[test]
    fn value_roundtrip_preserves_fields() {
        let original = Session::from_value(&json!({
            "id": 11,
            "event_id": 3,
            "venue_id": 4,
            "start_time": "2026-05-09 20:00:00",
            "capacity": 500,
            "available_seats": 120,
            "reserved_seats": 30,
            "sold_seats": 350,
            "base_price": 40.0,
            "currency": "eur",
            "status": "active",
        }));
        let restored = Session::from_value(&original.to_value());
        assert_eq!(original, restored);
        assert_eq!(restored.currency(), "EUR");
    }
}
