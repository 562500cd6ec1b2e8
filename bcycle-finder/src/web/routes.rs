//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::warn;

use crate::chat::{Command, DeliveryError, RecordingSurface};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/command", post(run_command))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Run one chat command and return its replies.
///
/// Command failures (missing configuration, feed errors) are replies like
/// any other and come back with status 200.
async fn run_command(
    State(state): State<AppState>,
    Json(req): Json<CommandRequest>,
) -> Result<Json<CommandResponse>, AppError> {
    let command = Command::parse(&req.text).ok_or_else(|| AppError::BadRequest {
        message: format!("Not a bcycle command: {}", req.text.trim()),
    })?;

    let surface = RecordingSurface::new();
    state.pipeline.run(&command, &surface).await?;

    Ok(Json(CommandResponse {
        command: command.to_string(),
        messages: surface.take().await,
    }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
}

impl From<DeliveryError> for AppError {
    fn from(e: DeliveryError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use serde_json::{Value, json};

    use crate::config::BcycleConfig;
    use crate::format::Surface;
    use crate::gbfs::{MockFeedSource, Program};
    use crate::pipeline::CommandPipeline;

    async fn serve(config: BcycleConfig) -> String {
        let feeds = MockFeedSource::from_dir("data/mock_feeds").unwrap();
        let pipeline = CommandPipeline::new(Arc::new(config), Arc::new(feeds));
        let app = create_router(AppState::new(pipeline));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await });
        format!("http://{addr}")
    }

    fn madison() -> BcycleConfig {
        BcycleConfig::new(Some(Program::parse("madison").unwrap()))
    }

    async fn post(base: &str, text: &str) -> (StatusCode, Value) {
        let response = reqwest::Client::new()
            .post(format!("{base}/command"))
            .json(&json!({ "text": text }))
            .send()
            .await
            .unwrap();

        let status = StatusCode::from_u16(response.status().as_u16()).unwrap();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn health_check() {
        let base = serve(madison()).await;
        let body = reqwest::get(format!("{base}/health"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(body, "ok");
    }

    #[tokio::test]
    async fn command_returns_text_messages() {
        let base = serve(madison()).await;
        let (status, body) = post(&base, "bcycle me #5").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "command": "bcycle station #5",
                "messages": [{ "text": "#5 - State St\n> Active | Bikes: 4 | Docks: 6" }]
            })
        );
    }

    #[tokio::test]
    async fn rich_surface_returns_attachments() {
        let base = serve(madison().with_surface(Surface::Rich)).await;
        let (status, body) = post(&base, "bcycle prices").await;

        assert_eq!(status, StatusCode::OK);
        let attachments = body["messages"][0]["attachments"].as_array().unwrap();
        assert_eq!(attachments.len(), 2);
        assert_eq!(attachments[1]["title"], "Day Pass ($15.00)");
    }

    #[tokio::test]
    async fn command_failure_is_a_reply() {
        let base = serve(BcycleConfig::new(None)).await;
        let (status, body) = post(&base, "bcycle info").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["messages"],
            json!([{ "text": "You must configure BCYCLE_CITY before use." }])
        );
    }

    #[tokio::test]
    async fn unknown_text_is_bad_request() {
        let base = serve(madison()).await;
        let (status, body) = post(&base, "what time is it").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Not a bcycle command: what time is it");
    }
}
