//! Canned route handlers.

use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, info};

pub const HELLO_BODY: &str = "Hello World!";
pub const STATUS_OK_BODY: &str = "I'm ok!";
pub const STATUS_500_BODY: &str = "I'm not OK!";
pub const NO_FILE_BODY: &str = "<no file>";

/// State shared by every handler.
#[derive(Debug, Clone)]
pub struct RouteState {
    pub data_file: Arc<PathBuf>,
}

pub async fn hello() -> &'static str {
    info!(route = "/", "Handling request");
    HELLO_BODY
}

pub async fn status() -> &'static str {
    info!(route = "/status", "Handling request");
    STATUS_OK_BODY
}

pub async fn status_500() -> (StatusCode, &'static str) {
    info!(route = "/status500", "Handling request");
    (StatusCode::INTERNAL_SERVER_ERROR, STATUS_500_BODY)
}

/// Never responds. The connection stays open until the peer gives up.
pub async fn status_timeout() -> Response {
    info!(route = "/statusTimeout", "Not going to send a response");
    match std::future::pending::<Infallible>().await {}
}

/// Serve the data file, or a placeholder when it cannot be read.
pub async fn file(State(state): State<RouteState>) -> Response {
    info!(route = "/file", "Handling request");
    match tokio::fs::read(state.data_file.as_path()).await {
        Ok(data) => Bytes::from(data).into_response(),
        Err(e) => {
            debug!(path = %state.data_file.display(), error = %e, "Data file unavailable");
            NO_FILE_BODY.into_response()
        }
    }
}

pub async fn not_found() -> StatusCode {
    StatusCode::NOT_FOUND
}
