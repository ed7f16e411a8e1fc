use crate::constants::{
    DEFAULT_CACHE_TTL_SECONDS, DEFAULT_MAX_RETRIES, DEFAULT_TIMEOUT_SECONDS, PROD_BASE_URL,
    TEST_BASE_URL,
};
use crate::error::{Bil24Error, Result};
use serde::Deserialize;
use std::fmt;
use std::fs;
use std::str::FromStr;

/// Remote environment the client talks to. Each environment maps to a
/// fixed base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Test,
    Prod,
}

impl Environment {
    pub fn base_url(&self) -> &'static str {
        match self {
            Environment::Test => TEST_BASE_URL,
            Environment::Prod => PROD_BASE_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = Bil24Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "test" => Ok(Environment::Test),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(Bil24Error::Config(format!(
                "unknown environment '{}', expected 'test' or 'prod'",
                other
            ))),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Test => write!(f, "test"),
            Environment::Prod => write!(f, "prod"),
        }
    }
}

/// Credentials and tuning knobs for [`crate::client::ApiClient`].
///
/// The client takes this struct explicitly; there is no process-global
/// settings lookup.
#[derive(Debug, Clone, Deserialize)]
pub struct Bil24Config {
    /// Interface identifier issued by Bil24.
    #[serde(default)]
    pub fid: String,
    /// Bearer token issued by Bil24.
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub env: Environment,
    /// Overrides the environment base URL. Meant for staging setups and
    /// local test servers.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_cache_ttl_seconds")]
    pub cache_ttl_seconds: u64,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_max_retries() -> u32 {
    DEFAULT_MAX_RETRIES
}

fn default_cache_ttl_seconds() -> u64 {
    DEFAULT_CACHE_TTL_SECONDS
}

impl Default for Bil24Config {
    fn default() -> Self {
        Self {
            fid: String::new(),
            token: String::new(),
            env: Environment::default(),
            base_url: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_retries: DEFAULT_MAX_RETRIES,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
        }
    }
}

impl Bil24Config {
    /// Both credentials must be present before any request is attempted.
    pub fn is_configured(&self) -> bool {
        !self.fid.trim().is_empty() && !self.token.trim().is_empty()
    }

    /// Effective base URL: explicit override first, then the environment.
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or_else(|| self.env.base_url())
    }

    /// Builds a config from `BIL24_FID`, `BIL24_TOKEN` and `BIL24_ENV`
    /// environment variables (a `.env` file is honored).
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let mut config = Self {
            fid: std::env::var("BIL24_FID").unwrap_or_default(),
            token: std::env::var("BIL24_TOKEN").unwrap_or_default(),
            ..Self::default()
        };
        if let Ok(env) = std::env::var("BIL24_ENV") {
            config.env = env.parse()?;
        }
        Ok(config)
    }
}

/// Top-level `config.toml` shape.
#[derive(Debug, Deserialize)]
pub struct Config {
    pub bil24: Bil24Config,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from("config.toml")
    }

    pub fn load_from(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Bil24Error::Config(format!("Failed to read config file '{}': {}", path, e))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
