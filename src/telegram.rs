// SPDX-License-Identifier: MIT

//! Telegram Bot API client.
//!
//! Covers the three calls the bot needs: long-poll update fetching, Markdown
//! message replies, and document uploads for /export.

use crate::error::AppError;
use serde::Deserialize;

/// Telegram Bot API client.
#[derive(Clone)]
pub struct TelegramClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    /// Create a client for the given bot token.
    pub fn new(token: String) -> Self {
        Self::with_base_url("https://api.telegram.org".to_string(), token)
    }

    /// Create a client against a custom API host (tests).
    pub fn with_base_url(base_url: String, token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    /// Long-poll for updates after `offset`.
    ///
    /// Blocks server-side for up to `timeout_secs` when no updates are
    /// pending; an empty vec on timeout is the normal idle outcome.
    pub async fn get_updates(&self, offset: i64, timeout_secs: u32) -> Result<Vec<Update>, AppError> {
        let url = self.method_url("getUpdates");
        let response = self
            .http
            .get(&url)
            .query(&[
                ("offset", offset.to_string()),
                ("timeout", timeout_secs.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Telegram(e.to_string()))?;

        self.unwrap_envelope(response).await
    }

    /// Send a Markdown-formatted message to a chat.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), AppError> {
        let url = self.method_url("sendMessage");
        let body = serde_json::json!({
            "chat_id": chat_id,
            "text": text,
            "parse_mode": "Markdown",
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Telegram(e.to_string()))?;

        let _: Message = self.unwrap_envelope(response).await?;
        Ok(())
    }

    /// Upload a document to a chat.
    pub async fn send_document(
        &self,
        chat_id: i64,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<(), AppError> {
        let url = self.method_url("sendDocument");
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new()
            .text("chat_id", chat_id.to_string())
            .part("document", part);

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::Telegram(e.to_string()))?;

        let _: Message = self.unwrap_envelope(response).await?;
        Ok(())
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    /// Unwrap Telegram's `{ok, result, description}` envelope.
    async fn unwrap_envelope<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Telegram(format!("HTTP {}: {}", status, body)));
        }

        let envelope: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| AppError::Telegram(format!("JSON parse error: {}", e)))?;

        if !envelope.ok {
            return Err(AppError::Telegram(
                envelope.description.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        envelope
            .result
            .ok_or_else(|| AppError::Telegram("missing result".to_string()))
    }
}

/// Telegram API response envelope.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

/// One incoming update.
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

/// An incoming chat message.
#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub text: Option<String>,
}

/// The chat a message arrived in.
#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}
