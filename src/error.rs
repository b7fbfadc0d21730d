// SPDX-License-Identifier: MIT

//! Application error types.

/// Application error type.
///
/// Command handlers report these back to the chat as plain messages; none of
/// them aborts the polling loop.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Telegram API error: {0}")]
    Telegram(String),

    #[error("Directory store error: {0}")]
    Store(String),

    #[error("Export file error: {0}")]
    Export(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
