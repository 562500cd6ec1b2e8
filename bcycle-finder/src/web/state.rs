//! Application state for the web layer.

use std::sync::Arc;

use crate::pipeline::CommandPipeline;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Pipeline every request is run through
    pub pipeline: Arc<CommandPipeline>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(pipeline: CommandPipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}
