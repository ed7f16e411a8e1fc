use super::{value_to_f64, value_to_i64};
use crate::constants::ORDER_CURRENCIES;
use crate::error::{Bil24Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};
use std::fmt;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(OrderStatus::Pending),
            "paid" => Some(OrderStatus::Paid),
            "cancelled" => Some(OrderStatus::Cancelled),
            "refunded" => Some(OrderStatus::Refunded),
            _ => None,
        }
    }
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub product_id: i64,
    pub quantity: u32,
    pub price: f64,
}

impl OrderItem {
    fn from_value(value: &Value) -> Option<Self> {
        Some(Self {
            product_id: value_to_i64(value.get("product_id")?)?,
            quantity: value
                .get("quantity")
                .and_then(value_to_i64)
                .map(|q| q.max(0) as u32)?,
            price: value.get("price").and_then(value_to_f64)?,
        })
    }

    fn to_value(&self) -> Value {
        json!({
            "product_id": self.product_id,
            "quantity": self.quantity,
            "price": self.price,
        })
    }
}

/// A customer order against the remote platform.
///
/// The email, amount and currency setters return errors instead of
/// clamping; this mirrors the remote platform's stricter handling of order
/// data and differs from the other models on purpose.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    id: Option<i64>,
    bil24_id: Option<i64>,
    customer_email: Option<String>,
    total_amount: f64,
    currency: String,
    status: OrderStatus,
    items: Vec<OrderItem>,
}

impl Default for Order {
    fn default() -> Self {
        Self {
            id: None,
            bil24_id: None,
            customer_email: None,
            total_amount: 0.0,
            currency: "RUB".to_string(),
            status: OrderStatus::default(),
            items: Vec::new(),
        }
    }
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an order from a JSON map. Invalid email, negative amounts
    /// and unsupported currencies abort construction; malformed line items
    /// are skipped.
    pub fn from_value(data: &Value) -> Result<Self> {
        let mut order = Self::default();
        if let Some(map) = data.as_object() {
            for (key, value) in map {
                order.apply(key, value)?;
            }
        }
        Ok(order)
    }

    fn apply(&mut self, key: &str, value: &Value) -> Result<()> {
        match key {
            "id" => self.id = value_to_i64(value),
            "bil24_id" => self.bil24_id = value_to_i64(value),
            "customer_email" => {
                if let Some(s) = value.as_str() {
                    self.set_customer_email(s)?;
                }
            }
            "total_amount" => {
                if let Some(amount) = value_to_f64(value) {
                    self.set_total_amount(amount)?;
                }
            }
            "currency" => {
                if let Some(s) = value.as_str() {
                    self.set_currency(s)?;
                }
            }
            "status" => {
                if let Some(s) = value.as_str() {
                    self.set_status(s);
                }
            }
            "items" => {
                if let Some(items) = value.as_array() {
                    for item in items.iter().filter_map(OrderItem::from_value) {
                        self.add_item(item);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    pub fn to_value(&self) -> Value {
        json!({
            "id": self.id,
            "bil24_id": self.bil24_id,
            "customer_email": self.customer_email,
            "total_amount": self.total_amount,
            "currency": self.currency,
            "status": self.status.as_str(),
            "items": self.items.iter().map(OrderItem::to_value).collect::<Vec<_>>(),
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

    pub fn customer_email(&self) -> Option<&str> {
        self.customer_email.as_deref()
    }

    pub fn set_customer_email(&mut self, email: &str) -> Result<()> {
        let email = email.trim();
        if !EMAIL_PATTERN.is_match(email) {
            return Err(Bil24Error::Validation(format!(
                "invalid customer email '{}'",
                email
            )));
        }
        self.customer_email = Some(email.to_string());
        Ok(())
    }

    pub fn total_amount(&self) -> f64 {
        self.total_amount
    }

    /// Negative amounts are rejected, not clamped.
    pub fn set_total_amount(&mut self, amount: f64) -> Result<()> {
        if amount < 0.0 {
            return Err(Bil24Error::Validation(format!(
                "total amount {} must not be negative",
                amount
            )));
        }
        self.total_amount = amount;
        Ok(())
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn set_currency(&mut self, currency: &str) -> Result<()> {
        let currency = currency.trim().to_uppercase();
        if !ORDER_CURRENCIES.contains(&currency.as_str()) {
            return Err(Bil24Error::Validation(format!(
                "unsupported order currency '{}'",
                currency
            )));
        }
        self.currency = currency;
        Ok(())
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn set_status(&mut self, status: &str) {
        if let Some(status) = OrderStatus::parse(status) {
            self.status = status;
        }
    }

    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    pub fn add_item(&mut self, item: OrderItem) {
        self.items.push(item);
    }

    /// Sum of quantity times price over all items. Not reconciled against
    /// `total_amount`.
    pub fn calculate_total(&self) -> f64 {
        self.items
            .iter()
            .map(|item| f64::from(item.quantity) * item.price)
            .sum()
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self
            .id
            .map_or_else(|| "new".to_string(), |id| id.to_string());
        write!(f, "Order {} ({:.2} {})", id, self.total_amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invalid_email_is_rejected() {
        let mut order = Order::new();
        assert!(order.set_customer_email("not-an-email").is_err());
        assert!(order.set_customer_email("a@b").is_err());
        assert_eq!(order.customer_email(), None);

        order.set_customer_email("buyer@example.com").unwrap();
        assert_eq!(order.customer_email(), Some("buyer@example.com"));
    }

    #[test]
    fn negative_amount_errors_instead_of_clamping() {
        let mut order = Order::new();
        assert!(order.set_total_amount(-1.0).is_err());
        assert_eq!(order.total_amount(), 0.0);

        order.set_total_amount(80.0).unwrap();
        assert_eq!(order.total_amount(), 80.0);
    }

    #[test]
    fn currency_allow_list_is_enforced() {
        let mut order = Order::new();
        order.set_currency("usd").unwrap();
        assert_eq!(order.currency(), "USD");

        assert!(order.set_currency("BTC").is_err());
        assert_eq!(order.currency(), "USD");
    }

    #[test]
    fn calculate_total_sums_items() {
        let mut order = Order::new();
        order.add_item(OrderItem {
            product_id: 1,
            quantity: 2,
            price: 25.0,
        });
        order.add_item(OrderItem {
            product_id: 2,
            quantity: 1,
            price: 30.0,
        });
        assert_eq!(order.calculate_total(), 80.0);
    }

    #[test]
    fn total_is_not_reconciled_with_items() {
        let mut order = Order::new();
        order.set_total_amount(10.0).unwrap();
        order.add_item(OrderItem {
            product_id: 1,
            quantity: 1,
            price: 99.0,
        });
        assert_eq!(order.total_amount(), 10.0);
        assert_eq!(order.calculate_total(), 99.0);
    }

    #[test]
    fn from_value_roundtrip_and_item_parsing() {
        let original = Order::from_value(&json!({
            "id": 5,
            "customer_email": "buyer@example.com",
            "total_amount": 80.0,
            "currency": "EUR",
            "status": "paid",
            "items": [
                {"product_id": 1, "quantity": 2, "price": 25.0},
                {"product_id": 2, "quantity": 1, "price": 30.0},
                {"quantity": 1},
            ],
        }))
        .unwrap();
        assert_eq!(original.items().len(), 2);

        let restored = Order::from_value(&original.to_value()).unwrap();
        assert_eq!(original, restored);
    }

    #[test]
    fn from_value_rejects_bad_email() {
        let result = Order::from_value(&json!({"customer_email": "nope"}));
        assert!(matches!(result, Err(Bil24Error::Validation(_))));
    }
}
