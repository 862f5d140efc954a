//! Outbound message delivery.

pub mod telegram;

pub use telegram::TelegramSender;

use async_trait::async_trait;

use crate::error::ChannelError;

/// Delivers text to a chat.
///
/// Implementations are best-effort: callers log and drop failures rather
/// than retrying or surfacing them to the user.
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str) -> Result<(), ChannelError>;
}
