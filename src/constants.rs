/// Endpoint and header constants for the Bil24 API.

// Base URLs per environment
pub const TEST_BASE_URL: &str = "https://api.bil24.pro:1240";
pub const PROD_BASE_URL: &str = "https://api.bil24.pro";

/// Interface-identifier header sent with every request.
pub const FID_HEADER: &str = "X-FID";

// Client defaults
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 3600;

/// Currencies accepted on orders.
pub const ORDER_CURRENCIES: &[&str] = &["RUB", "USD", "EUR", "GBP"];
