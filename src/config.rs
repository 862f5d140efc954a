//! Configuration types.

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default webhook listen port.
const DEFAULT_PORT: u16 = 5000;
/// Default chart-cache capacity (entries, LRU-evicted).
const DEFAULT_CHART_CACHE_CAP: usize = 1024;
/// Hosted chart-computation service.
const DEFAULT_ASTRO_BASE_URL: &str = "https://json.freeastrologyapi.com";
/// Telegram Bot API host.
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
/// Nominatim search endpoint.
const DEFAULT_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Bot configuration, read once at startup.
#[derive(Debug)]
pub struct AppConfig {
    /// Telegram bot token.
    pub bot_token: SecretString,
    /// API key for the chart-computation service.
    pub astro_api_key: SecretString,
    /// Webhook listen port.
    pub port: u16,
    /// Base URL of the chart-computation service.
    pub astro_base_url: String,
    /// Base URL of the Telegram Bot API.
    pub telegram_api_url: String,
    /// Geocoding search endpoint.
    pub geocode_url: String,
    /// Maximum number of cached charts before LRU eviction.
    pub chart_cache_cap: usize,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// `BOT_TOKEN` and `ASTRO_API_KEY` are required; everything else has
    /// a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = require_env("BOT_TOKEN")?;
        let astro_api_key = require_env("ASTRO_API_KEY")?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "PORT".into(),
                message: format!("not a port number: {raw:?}"),
            })?,
            Err(_) => DEFAULT_PORT,
        };

        let chart_cache_cap = match std::env::var("CHART_CACHE_CAP") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "CHART_CACHE_CAP".into(),
                message: format!("not a capacity: {raw:?}"),
            })?,
            Err(_) => DEFAULT_CHART_CACHE_CAP,
        };

        Ok(Self {
            bot_token: SecretString::from(bot_token),
            astro_api_key: SecretString::from(astro_api_key),
            port,
            astro_base_url: env_or("ASTRO_BASE_URL", DEFAULT_ASTRO_BASE_URL),
            telegram_api_url: env_or("TELEGRAM_API_URL", DEFAULT_TELEGRAM_API_URL),
            geocode_url: env_or("GEOCODE_URL", DEFAULT_GEOCODE_URL),
            chart_cache_cap,
        })
    }
}

fn require_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
