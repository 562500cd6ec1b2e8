use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use bcycle_finder::config::BcycleConfig;
use bcycle_finder::gbfs::{FeedSource, GbfsClient, MockFeedSource};
use bcycle_finder::pipeline::CommandPipeline;
use bcycle_finder::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match BcycleConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            return Err(e.into());
        }
    };

    match &config.program {
        Some(program) => info!(%program, surface = %config.surface, "configured"),
        None => warn!("BCYCLE_CITY not set. Every command will report a configuration error."),
    }

    let feeds: Arc<dyn FeedSource> = match &config.mock_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "serving feeds from mock data");
            Arc::new(MockFeedSource::from_dir(dir)?)
        }
        None => {
            info!(base_url = %config.gbfs.base_url, "fetching live feeds");
            Arc::new(GbfsClient::new(config.gbfs.clone())?)
        }
    };

    let addr = config.bind_addr;
    let pipeline = CommandPipeline::new(Arc::new(config), feeds);
    let app = create_router(AppState::new(pipeline));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    info!("  GET  /health   - Health check");
    info!("  POST /command  - Run a bcycle command, body {{\"text\": \"bcycle ...\"}}");

    axum::serve(listener, app).await?;
    Ok(())
}
