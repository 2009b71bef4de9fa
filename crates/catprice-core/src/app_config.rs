use std::net::SocketAddr;

use crate::catalog::OptionPolicy;
use crate::delivery::DistanceBand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub cardapioweb_base_url: String,
    pub cardapioweb_api_key: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub client_timeout_secs: u64,
    pub client_user_agent: String,
    pub client_max_retries: u32,
    pub client_backoff_base_ms: u64,
    /// Band used when a request or command does not name one.
    pub default_band: DistanceBand,
    pub option_policy: OptionPolicy,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("cardapioweb_base_url", &self.cardapioweb_base_url)
            .field("cardapioweb_api_key", &"[redacted]")
            .field("client_timeout_secs", &self.client_timeout_secs)
            .field("client_user_agent", &self.client_user_agent)
            .field("client_max_retries", &self.client_max_retries)
            .field("client_backoff_base_ms", &self.client_backoff_base_ms)
            .field("default_band", &self.default_band)
            .field("option_policy", &self.option_policy)
            .finish()
    }
}
