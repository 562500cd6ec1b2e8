//! Chat-facing edges of the pipeline: inbound commands and outbound delivery.

mod command;
mod surface;

pub use command::Command;
pub use surface::{ChatSurface, DeliveryError, RecordingSurface};
