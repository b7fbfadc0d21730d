// SPDX-License-Identifier: MIT

//! Health endpoint for platform liveness checks.
//!
//! The hosting platform requires a bound port; this router exists only to
//! answer its probe and shares no state with the bot.

use axum::{routing::get, Router};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Liveness probe response
async fn health_check() -> &'static str {
    "✅ Bot is running!"
}

/// Build the health router.
pub fn create_router() -> Router {
    Router::new().route("/", get(health_check)).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
}
