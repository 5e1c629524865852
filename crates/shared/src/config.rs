//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Session token configuration.
    pub session: SessionConfig,
    /// CSRF configuration.
    pub csrf: CsrfConfig,
    /// Portal presentation defaults.
    #[serde(default)]
    pub portal: PortalConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Session token configuration.
///
/// Tokens are issued by the host platform; this service only validates them.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Secret shared with the host for verifying session tokens.
    pub jwt_secret: String,
    /// Lifetime of tokens minted by the development seeder, in seconds.
    #[serde(default = "default_token_expiry")]
    pub token_expiry_secs: u64,
}

fn default_token_expiry() -> u64 {
    28800 // 8 hours
}

/// CSRF configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CsrfConfig {
    /// Secret mixed into every issued token.
    pub secret: String,
}

/// Portal presentation defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct PortalConfig {
    /// Date format used when the user's language has none.
    #[serde(default = "default_date_format")]
    pub default_date_format: String,
    /// Language assumed when the session carries none.
    #[serde(default = "default_lang")]
    pub default_lang: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            default_date_format: default_date_format(),
            default_lang: default_lang(),
        }
    }
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_lang() -> String {
    "en_US".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("PORTAL_LEDGER").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
