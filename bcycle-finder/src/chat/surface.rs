//! Outbound delivery to a chat surface.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::format::Message;

/// Error returned when a chat surface cannot deliver a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("delivery failed: {0}")]
pub struct DeliveryError(pub String);

/// Abstract interface for sending messages to the requesting user.
#[async_trait]
pub trait ChatSurface: Send + Sync {
    /// Deliver one message.
    async fn send(&self, message: Message) -> Result<(), DeliveryError>;
}

/// Surface that keeps delivered messages in memory.
///
/// Used by the HTTP adapter to collect a command's replies, and by tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    sent: Mutex<Vec<Message>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages delivered so far.
    pub async fn messages(&self) -> Vec<Message> {
        self.sent.lock().await.clone()
    }

    /// Remove and return the messages delivered so far.
    pub async fn take(&self) -> Vec<Message> {
        std::mem::take(&mut *self.sent.lock().await)
    }
}

#[async_trait]
impl ChatSurface for RecordingSurface {
    async fn send(&self, message: Message) -> Result<(), DeliveryError> {
        self.sent.lock().await.push(message);
        Ok(())
    }
}
