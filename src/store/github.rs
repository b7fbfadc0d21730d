// SPDX-License-Identifier: MIT

//! GitHub-backed directory store.
//!
//! The directory lives as a single JSON document in a GitHub repository. Reads
//! go through the unauthenticated raw-content URL; writes go through the
//! contents API with the document's current blob SHA as an
//! optimistic-concurrency precondition.

use crate::error::AppError;
use crate::models::{DirectoryDocument, UserRecord};
use base64::Engine;
use reqwest::header;
use serde::Deserialize;

/// Commit message used for every write-back.
const COMMIT_MESSAGE: &str = "Update user list";

/// User-Agent sent on contents-API calls (GitHub rejects requests without one).
const USER_AGENT: &str = "loginid-bot";

/// Client for the remote directory document.
#[derive(Clone)]
pub struct DirectoryStore {
    http: reqwest::Client,
    raw_url: String,
    api_url: String,
    token: String,
}

/// Contents-API metadata response; only the blob SHA is used.
#[derive(Debug, Deserialize)]
struct ContentsMeta {
    #[serde(default)]
    sha: String,
}

impl DirectoryStore {
    /// Create a store for the given document URLs and bearer credential.
    pub fn new(raw_url: String, api_url: String, token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            raw_url,
            api_url,
            token,
        }
    }

    /// Fetch the full directory.
    ///
    /// Fail-open by design: any transport error, non-200 status, or JSON the
    /// document shapes don't cover degrades to an empty directory. Callers
    /// cannot distinguish "empty" from "fetch failed"; the failure is only
    /// visible in the logs.
    pub async fn fetch(&self) -> Vec<UserRecord> {
        let response = match self.http.get(&self.raw_url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "Directory fetch failed, treating as empty");
                return Vec::new();
            }
        };

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "Directory fetch non-200, treating as empty");
            return Vec::new();
        }

        match response.json::<DirectoryDocument>().await {
            Ok(doc) => doc.into_users(),
            Err(e) => {
                tracing::warn!(error = %e, "Directory document unparsable, treating as empty");
                Vec::new()
            }
        }
    }

    /// Write the full directory back, replacing the remote document.
    ///
    /// Reads the document's current blob SHA first and sends it with the PUT;
    /// GitHub rejects the write if the SHA has moved in the meantime. No retry
    /// on mismatch: `false` is the only signal the caller gets.
    pub async fn store(&self, users: &[UserRecord]) -> bool {
        let sha = match self.current_revision().await {
            Ok(sha) => sha,
            Err(e) => {
                tracing::warn!(error = %e, "Revision lookup failed, aborting store");
                return false;
            }
        };

        let content = serialize_directory(users);
        let encoded = base64::engine::general_purpose::STANDARD.encode(content.as_bytes());

        let body = serde_json::json!({
            "message": COMMIT_MESSAGE,
            "content": encoded,
            "sha": sha,
        });

        let response = match self
            .http
            .put(&self.api_url)
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .header(header::ACCEPT, "application/vnd.github.v3+json")
            .header(header::USER_AGENT, USER_AGENT)
            .json(&body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "Directory store PUT failed");
                return false;
            }
        };

        if response.status().is_success() {
            tracing::info!(count = users.len(), "Directory stored");
            true
        } else {
            tracing::warn!(status = %response.status(), "Directory store rejected");
            false
        }
    }

    /// Fetch the current blob SHA of the remote document.
    async fn current_revision(&self) -> Result<String, AppError> {
        let response = self
            .http
            .get(&self.api_url)
            .header(header::AUTHORIZATION, format!("token {}", self.token))
            .header(header::ACCEPT, "application/vnd.github.v3+json")
            .header(header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| AppError::Store(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Store(format!("HTTP {}", response.status())));
        }

        let meta: ContentsMeta = response
            .json()
            .await
            .map_err(|e| AppError::Store(format!("JSON parse error: {}", e)))?;
        Ok(meta.sha)
    }
}

/// Serialize the directory to the storage document format (2-space indent).
pub fn serialize_directory(users: &[UserRecord]) -> String {
    // serde_json pretty-printing uses 2-space indentation
    serde_json::to_string_pretty(users).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            username: format!("user_{id}"),
            password: "pw".to_string(),
            expires_at: "2025-10-10".to_string(),
            allow_offline: false,
        }
    }

    #[test]
    fn test_serialize_uses_two_space_indent() {
        let out = serialize_directory(&[record("a")]);
        assert!(out.starts_with("[\n  {\n    \"id\": \"a\""));
        assert!(out.contains("\"expiresAt\": \"2025-10-10\""));
        assert!(out.contains("\"allowOffline\": false"));
    }

    #[test]
    fn test_serialize_empty_directory() {
        assert_eq!(serialize_directory(&[]), "[]");
    }
}
