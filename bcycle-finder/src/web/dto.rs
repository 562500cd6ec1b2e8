//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::format::Message;

/// A chat message addressed to the bot.
#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    /// Message text, e.g. `bcycle search capitol`
    pub text: String,
}

/// Replies produced by one command.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// The command as understood, in canonical form
    pub command: String,

    /// Messages in delivery order
    pub messages: Vec<Message>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
