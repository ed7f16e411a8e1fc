use super::{value_to_f64, value_to_i64};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};
use std::fmt;

static COLOR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("valid color pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceCategoryStatus {
    #[default]
    Active,
    Inactive,
    SoldOut,
    ComingSoon,
}

impl PriceCategoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceCategoryStatus::Active => "active",
            PriceCategoryStatus::Inactive => "inactive",
            PriceCategoryStatus::SoldOut => "sold_out",
            PriceCategoryStatus::ComingSoon => "coming_soon",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(PriceCategoryStatus::Active),
            "inactive" => Some(PriceCategoryStatus::Inactive),
            "sold_out" => Some(PriceCategoryStatus::SoldOut),
            "coming_soon" => Some(PriceCategoryStatus::ComingSoon),
            _ => None,
        }
    }
}

/// A named ticket tier scoped to one event, with its own price, quantity
/// and eligibility rules.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCategory {
    id: Option<i64>,
    bil24_id: Option<i64>,
    event_id: Option<i64>,
    name: String,
    price: f64,
    currency: String,
    color: Option<String>,
    sort_order: u32,
    status: PriceCategoryStatus,
    min_age: Option<u32>,
    max_age: Option<u32>,
    /// `None` means unlimited.
    available_quantity: Option<i64>,
    max_per_order: Option<i64>,
}

impl Default for PriceCategory {
    fn default() -> Self {
        Self {
            id: None,
            bil24_id: None,
            event_id: None,
            name: String::new(),
            price: 0.0,
            currency: "RUB".to_string(),
            color: None,
            sort_order: 0,
            status: PriceCategoryStatus::default(),
            min_age: None,
            max_age: None,
            available_quantity: None,
            max_per_order: None,
        }
    }
}

impl PriceCategory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_value(data: &Value) -> Self {
        let mut category = Self::default();
        if let Some(map) = data.as_object() {
            for (key, value) in map {
                category.apply(key, value);
            }
        }
        category
    }

    fn apply(&mut self, key: &str, value: &Value) {
        match key {
            "id" => self.id = value_to_i64(value),
            "bil24_id" => self.bil24_id = value_to_i64(value),
            "event_id" => self.event_id = value_to_i64(value),
            "name" => {
                if let Some(s) = value.as_str() {
                    self.set_name(s);
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
            "color" => {
                if let Some(s) = value.as_str() {
                    self.set_color(s);
                }
            }
            "sort_order" => {
                if let Some(n) = value_to_i64(value) {
                    self.set_sort_order(n);
                }
            }
            "status" => {
                if let Some(s) = value.as_str() {
                    self.set_status(s);
                }
            }
            "min_age" => self.set_min_age(value_to_i64(value)),
            "max_age" => self.set_max_age(value_to_i64(value)),
            "available_quantity" => self.set_available_quantity(value_to_i64(value)),
            "max_per_order" => self.set_max_per_order(value_to_i64(value)),
            _ => {}
        }
    }

    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "bil24_id": self.bil24_id,
            "event_id": self.event_id,
            "name": self.name,
            "price": self.price,
            "currency": self.currency,
            "color": self.color,
            "sort_order": self.sort_order,
            "status": self.status.as_str(),
            "min_age": self.min_age,
            "max_age": self.max_age,
            "available_quantity": self.available_quantity,
            "max_per_order": self.max_per_order,
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

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn set_price(&mut self, price: f64) {
        self.price = price.max(0.0);
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn set_currency(&mut self, currency: &str) {
        self.currency = currency.trim().to_uppercase();
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    /// Only `#RRGGBB` values are accepted; anything else is silently
    /// rejected.
    pub fn set_color(&mut self, color: &str) {
        if COLOR_PATTERN.is_match(color) {
            self.color = Some(color.to_string());
        }
    }

    pub fn sort_order(&self) -> u32 {
        self.sort_order
    }

    pub fn set_sort_order(&mut self, order: i64) {
        self.sort_order = order.max(0) as u32;
    }

    pub fn status(&self) -> PriceCategoryStatus {
        self.status
    }

    pub fn set_status(&mut self, status: &str) {
        if let Some(status) = PriceCategoryStatus::parse(status) {
            self.status = status;
        }
    }

    pub fn min_age(&self) -> Option<u32> {
        self.min_age
    }

    pub fn set_min_age(&mut self, age: Option<i64>) {
        self.min_age = age.map(|a| a.max(0) as u32);
    }

    pub fn max_age(&self) -> Option<u32> {
        self.max_age
    }

    pub fn set_max_age(&mut self, age: Option<i64>) {
        self.max_age = age.map(|a| a.max(0) as u32);
    }

    pub fn available_quantity(&self) -> Option<i64> {
        self.available_quantity
    }

    pub fn set_available_quantity(&mut self, quantity: Option<i64>) {
        self.available_quantity = quantity.map(|q| q.max(0));
    }

    pub fn max_per_order(&self) -> Option<i64> {
        self.max_per_order
    }

    pub fn set_max_per_order(&mut self, max: Option<i64>) {
        self.max_per_order = max.map(|m| m.max(1));
    }

    /// Sold out when the status says so or the quantity is exhausted.
    /// An unlimited category (`available_quantity = None`) is never sold
    /// out by quantity.
    pub fn is_sold_out(&self) -> bool {
        self.status == PriceCategoryStatus::SoldOut
            || self.available_quantity.is_some_and(|q| q <= 0)
    }

    /// Decrements the quantity, flipping an active category to sold out
    /// when it reaches zero. No-op for unlimited categories.
    pub fn reduce_quantity(&mut self, amount: i64) {
        if let Some(quantity) = self.available_quantity {
            let next = (quantity - amount.max(0)).max(0);
            self.available_quantity = Some(next);
            if next == 0 && self.status == PriceCategoryStatus::Active {
                self.status = PriceCategoryStatus::SoldOut;
            }
        }
    }

    /// Increments the quantity, flipping a sold-out category back to
    /// active once stock is available again.
    pub fn increase_quantity(&mut self, amount: i64) {
        if let Some(quantity) = self.available_quantity {
            let next = quantity.saturating_add(amount.max(0));
            self.available_quantity = Some(next);
            if next > 0 && self.status == PriceCategoryStatus::SoldOut {
                self.status = PriceCategoryStatus::Active;
            }
        }
    }
}

impl fmt::Display for PriceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.2} {})", self.name, self.price, self.currency)
    }
}
