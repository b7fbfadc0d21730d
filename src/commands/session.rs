// SPDX-License-Identifier: MIT

//! Multi-turn add-user session state.
//!
//! The only conversational flow is adding a user: `/add` puts the chat into
//! [`SessionState::Adding`], and every terminal outcome (duplicate id, bad
//! date, store success, store failure) tears the session down. Malformed
//! input is the one self-loop: the chat stays in `Adding` and is re-prompted.
//! There is no cancel transition.

use crate::models::{is_valid_expiry_date, UserRecord};
use dashmap::DashMap;
use std::sync::Arc;

/// Per-chat conversation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the 5-field add record.
    Adding,
}

/// Active sessions keyed by chat id, shared across the dispatch loop.
#[derive(Clone, Default)]
pub struct Sessions {
    inner: Arc<DashMap<i64, SessionState>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state for a chat, if any flow is active.
    pub fn get(&self, chat_id: i64) -> Option<SessionState> {
        self.inner.get(&chat_id).map(|s| *s)
    }

    /// Enter a state for a chat.
    pub fn enter(&self, chat_id: i64, state: SessionState) {
        self.inner.insert(chat_id, state);
    }

    /// Terminal transition: drop the chat's session.
    pub fn end(&self, chat_id: i64) {
        self.inner.remove(&chat_id);
    }
}

/// Outcome of evaluating one add-flow input against a directory snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// Field count != 5; the session stays in `Adding`.
    Malformed,
    /// The device id already exists in the snapshot; terminal.
    DuplicateId(String),
    /// `expiresAt` is not a strict `YYYY-MM-DD` date; terminal.
    InvalidDate(String),
    /// Validated record ready to append; terminal after the store attempt.
    Accepted(UserRecord),
}

/// Evaluate one line of add-flow input.
///
/// Pure with respect to the snapshot: no I/O happens here, so the duplicate
/// check is only as fresh as the snapshot the caller fetched.
pub fn evaluate_add(input: &str, snapshot: &[UserRecord]) -> AddOutcome {
    let parts: Vec<&str> = input.split(',').collect();
    if parts.len() != 5 {
        return AddOutcome::Malformed;
    }

    let id = parts[0].trim().to_string();
    let username = parts[1].trim().to_string();
    let password = parts[2].trim().to_string();
    let expires_at = parts[3].trim().to_string();
    let allow_offline = parts[4].trim().eq_ignore_ascii_case("true");

    if snapshot.iter().any(|u| u.id == id) {
        return AddOutcome::DuplicateId(id);
    }

    if !is_valid_expiry_date(&expires_at) {
        return AddOutcome::InvalidDate(expires_at);
    }

    AddOutcome::Accepted(UserRecord {
        id,
        username,
        password,
        expires_at,
        allow_offline,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> Vec<UserRecord> {
        vec![UserRecord {
            id: "dev-1".to_string(),
            username: "alice".to_string(),
            password: "pw".to_string(),
            expires_at: "2030-01-01".to_string(),
            allow_offline: false,
        }]
    }

    #[test]
    fn test_add_rejects_wrong_field_count() {
        assert_eq!(evaluate_add("a,b,c,d", &snapshot()), AddOutcome::Malformed);
        assert_eq!(evaluate_add("a,b,c,d,e,f", &snapshot()), AddOutcome::Malformed);
        assert_eq!(evaluate_add("", &snapshot()), AddOutcome::Malformed);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let outcome = evaluate_add("dev-1,bob,pw,2030-06-01,true", &snapshot());
        assert_eq!(outcome, AddOutcome::DuplicateId("dev-1".to_string()));
    }

    #[test]
    fn test_add_rejects_invalid_date() {
        let outcome = evaluate_add("dev-2,bob,pw,2025-13-40,true", &snapshot());
        assert_eq!(outcome, AddOutcome::InvalidDate("2025-13-40".to_string()));

        let outcome = evaluate_add("dev-2,bob,pw,10/10/2025,true", &snapshot());
        assert_eq!(outcome, AddOutcome::InvalidDate("10/10/2025".to_string()));
    }

    #[test]
    fn test_add_accepts_and_trims_fields() {
        let outcome = evaluate_add(" dev-2 , bob , pw , 2030-06-01 , TRUE ", &snapshot());
        match outcome {
            AddOutcome::Accepted(record) => {
                assert_eq!(record.id, "dev-2");
                assert_eq!(record.username, "bob");
                assert_eq!(record.expires_at, "2030-06-01");
                assert!(record.allow_offline);
            }
            other => panic!("expected Accepted, got {:?}", other),
        }
    }

    #[test]
    fn test_add_boolean_defaults_to_false() {
        let outcome = evaluate_add("dev-2,bob,pw,2030-06-01,yes", &snapshot());
        match outcome {
            AddOutcome::Accepted(record) => assert!(!record.allow_offline),
            other => panic!("expected Accepted, got {:?}", other),
        }
    }

    #[test]
    fn test_sessions_lifecycle() {
        let sessions = Sessions::new();
        assert_eq!(sessions.get(7), None);

        sessions.enter(7, SessionState::Adding);
        assert_eq!(sessions.get(7), Some(SessionState::Adding));

        sessions.end(7);
        assert_eq!(sessions.get(7), None);
    }
}
