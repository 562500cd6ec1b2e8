//! HTTP adapter.
//!
//! Lets any chat integration forward message text and receive the replies
//! the pipeline would have delivered.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
