//! Error types for Astro Assist.

/// Top-level error type for the bot.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Channel error: {0}")]
    Channel(#[from] ChannelError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Outbound message-delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("Failed to send message to chat {chat_id}: {reason}")]
    SendFailed { chat_id: i64, reason: String },
}

/// Chart-gateway transport errors.
///
/// Every remote outcome crosses the gateway boundary as one of these
/// variants; callers branch on them instead of seeing raw failures.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Request to {endpoint} failed: {reason}")]
    Http { endpoint: String, reason: String },

    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },

    #[error("Failed to decode response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

/// Unparsable user input during the birth-detail dialogue.
///
/// Never fatal: the controller re-prompts the same step.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid date {input:?}: expected DD-MM-YYYY")]
    BadDate { input: String },

    #[error("Invalid time {input:?}: expected HH:MM or HH:MM AM/PM")]
    BadTime { input: String },
}

/// Result type alias for the bot.
pub type Result<T> = std::result::Result<T, Error>;
