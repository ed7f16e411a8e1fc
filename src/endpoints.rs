use crate::client::ApiClient;
use crate::error::Result;
use serde_json::Value;

/// Typed facade over the Bil24 REST surface.
///
/// Each method fixes an HTTP verb and a path template and forwards
/// parameters and bodies verbatim. All error handling lives in
/// [`ApiClient`]; this layer only keeps the remote path vocabulary in one
/// place so callers never build paths themselves.
pub struct Endpoints {
    client: ApiClient,
}

impl Endpoints {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    // --- events ---

    pub async fn get_events(&self, params: &[(&str, String)]) -> Result<Value> {
        self.client.get("events", params).await
    }

    pub async fn get_event(&self, event_id: i64) -> Result<Value> {
        self.client.get(&format!("events/{}", event_id), &[]).await
    }

    pub async fn get_event_sessions(
        &self,
        event_id: i64,
        params: &[(&str, String)],
    ) -> Result<Value> {
        self.client
            .get(&format!("events/{}/sessions", event_id), params)
            .await
    }

    pub async fn get_session(&self, event_id: i64, session_id: i64) -> Result<Value> {
        self.client
            .get(&format!("events/{}/sessions/{}", event_id, session_id), &[])
            .await
    }

    pub async fn get_session_availability(
        &self,
        event_id: i64,
        session_id: i64,
    ) -> Result<Value> {
        self.client
            .get(
                &format!("events/{}/sessions/{}/availability", event_id, session_id),
                &[],
            )
            .await
    }

    pub async fn get_price_categories(&self, event_id: i64) -> Result<Value> {
        self.client
            .get(&format!("events/{}/price-categories", event_id), &[])
            .await
    }

    pub async fn get_event_stats(&self, event_id: i64) -> Result<Value> {
        self.client.get(&format!("events/{}/stats", event_id), &[]).await
    }

    // --- orders ---

    pub async fn get_orders(&self, params: &[(&str, String)]) -> Result<Value> {
        self.client.get("orders", params).await
    }

    pub async fn create_order(&self, order: &Value) -> Result<Value> {
        self.client.post("orders", order).await
    }

    pub async fn get_order(&self, order_id: i64) -> Result<Value> {
        self.client.get(&format!("orders/{}", order_id), &[]).await
    }

    pub async fn get_order_status(&self, order_id: i64) -> Result<Value> {
        self.client.get(&format!("orders/{}/status", order_id), &[]).await
    }

    pub async fn cancel_order(&self, order_id: i64) -> Result<Value> {
        self.client
            .post(&format!("orders/{}/cancel", order_id), &Value::Null)
            .await
    }

    pub async fn get_order_tickets(&self, order_id: i64) -> Result<Value> {
        self.client
            .get(&format!("orders/{}/tickets", order_id), &[])
            .await
    }

    // --- seats and reservations ---

    pub async fn check_seats(&self, session_id: i64, seats: &Value) -> Result<Value> {
        self.client
            .post(&format!("sessions/{}/check-seats", session_id), seats)
            .await
    }

    pub async fn reserve_seats(&self, session_id: i64, seats: &Value) -> Result<Value> {
        self.client
            .post(&format!("sessions/{}/reserve", session_id), seats)
            .await
    }

    pub async fn get_reservation(&self, reservation_id: i64) -> Result<Value> {
        self.client
            .get(&format!("reservations/{}", reservation_id), &[])
            .await
    }

    /// Releases a seat hold before it expires on its own.
    pub async fn release_reservation(&self, reservation_id: i64) -> Result<Value> {
        self.client
            .delete(&format!("reservations/{}", reservation_id))
            .await
    }

    // --- venues ---

    pub async fn get_venues(&self, params: &[(&str, String)]) -> Result<Value> {
        self.client.get("venues", params).await
    }

    pub async fn get_venue(&self, venue_id: i64) -> Result<Value> {
        self.client.get(&format!("venues/{}", venue_id), &[]).await
    }

    pub async fn get_venue_seating(&self, venue_id: i64) -> Result<Value> {
        self.client
            .get(&format!("venues/{}/seating", venue_id), &[])
            .await
    }

    // --- service ---

    pub async fn get_status(&self) -> Result<Value> {
        self.client.get("status", &[]).await
    }

    pub async fn get_version(&self) -> Result<Value> {
        self.client.get("version", &[]).await
    }
}
