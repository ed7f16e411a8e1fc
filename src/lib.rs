pub mod cache;
pub mod client;
pub mod config;
pub mod constants;
pub mod endpoints;
pub mod error;
pub mod logging;
pub mod models;

pub use client::ApiClient;
pub use config::{Bil24Config, Config, Environment};
pub use endpoints::Endpoints;
pub use error::{Bil24Error, Result};
