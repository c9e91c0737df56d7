//! HTTP surface of the test app.
//!
//! Five GET routes with fixed behavior:
//! - `/` - 200 `Hello World!`
//! - `/status` - 200 `I'm ok!`
//! - `/status500` - 500 `I'm not OK!`
//! - `/statusTimeout` - no response at all
//! - `/file` - 200 with the data file contents, or `<no file>`
//!
//! Everything else, including other methods on these paths, is a 404.

mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;

pub use routes::{HELLO_BODY, NO_FILE_BODY, STATUS_500_BODY, STATUS_OK_BODY};

use routes::RouteState;

/// Build the router serving `data_file` on `/file`.
pub fn router(data_file: impl Into<PathBuf>) -> Router {
    let state = RouteState {
        data_file: Arc::new(data_file.into()),
    };

    Router::new()
        .route("/", get(routes::hello).fallback(routes::not_found))
        .route("/status", get(routes::status).fallback(routes::not_found))
        .route(
            "/status500",
            get(routes::status_500).fallback(routes::not_found),
        )
        .route(
            "/statusTimeout",
            get(routes::status_timeout).fallback(routes::not_found),
        )
        .route("/file", get(routes::file).fallback(routes::not_found))
        .fallback(routes::not_found)
        .with_state(state)
}
