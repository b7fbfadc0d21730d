// SPDX-License-Identifier: MIT

//! Command parsing and dispatch.
//!
//! Each command performs an independent fetch-mutate-store cycle against the
//! remote directory; nothing is cached between invocations.

pub mod generate;
pub mod session;

use crate::error::Result;
use crate::models::UserRecord;
use crate::store::DirectoryStore;
use chrono::{NaiveDate, Utc};
use session::{AddOutcome, SessionState, Sessions};

/// Help text sent for /start.
const HELP_TEXT: &str = "🔐 *Login Management Bot*\n\
Available commands:\n\
/add - Add new user\n\
/remove - Remove user\n\
/list - List all users\n\
/export - Export users\n\
/summary - Show dashboard\n\
/generate - Generate random account";

/// Prompt sent when the add flow starts.
const ADD_PROMPT: &str =
    "Send user data in format:\n`<id>,<username>,<password>,<expiresAt>,<allowOffline>`";

/// Rejection sent for malformed add input; the session stays in the flow.
const ADD_FORMAT_ERROR: &str =
    "❌ Invalid format. Please send:\n`id,username,password,expiresAt,allowOffline`";

/// One recognized chat command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    List,
    Summary,
    Generate,
    Add,
    Remove(Vec<String>),
    Export,
}

impl Command {
    /// Parse a message as a command.
    ///
    /// Returns `None` for plain text and unrecognized commands. A trailing
    /// `@botname` on the command word is accepted and ignored.
    pub fn parse(text: &str) -> Option<Command> {
        let mut words = text.split_whitespace();
        let first = words.next()?;
        if !first.starts_with('/') {
            return None;
        }
        let name = first[1..].split('@').next().unwrap_or_default();
        let args: Vec<String> = words.map(str::to_string).collect();

        match name {
            "start" => Some(Command::Start),
            "list" => Some(Command::List),
            "summary" => Some(Command::Summary),
            "generate" => Some(Command::Generate),
            "add" => Some(Command::Add),
            "remove" => Some(Command::Remove(args)),
            "export" => Some(Command::Export),
            _ => None,
        }
    }
}

/// A reply the bot sends back to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Document { filename: String, bytes: Vec<u8> },
}

/// Routes incoming messages to command handlers.
///
/// Holds the per-chat session map for the multi-turn add flow; everything
/// else is stateless between messages.
#[derive(Clone)]
pub struct Dispatcher {
    store: DirectoryStore,
    sessions: Sessions,
    export_path: String,
}

impl Dispatcher {
    pub fn new(store: DirectoryStore, export_path: String) -> Self {
        Self {
            store,
            sessions: Sessions::new(),
            export_path,
        }
    }

    /// Handle one incoming message and produce the replies to send.
    ///
    /// Plain text outside an active add session is ignored (empty reply set).
    pub async fn handle_message(&self, chat_id: i64, text: &str) -> Result<Vec<Reply>> {
        let text = text.trim();

        if let Some(command) = Command::parse(text) {
            return self.handle_command(chat_id, command).await;
        }

        match self.sessions.get(chat_id) {
            Some(SessionState::Adding) => self.handle_add_input(chat_id, text).await,
            None => Ok(Vec::new()),
        }
    }

    async fn handle_command(&self, chat_id: i64, command: Command) -> Result<Vec<Reply>> {
        match command {
            Command::Start => Ok(vec![Reply::Text(HELP_TEXT.to_string())]),
            Command::List => Ok(vec![Reply::Text(self.list().await)]),
            Command::Summary => Ok(vec![Reply::Text(self.summary().await)]),
            Command::Generate => Ok(vec![Reply::Text(generate_reply())]),
            Command::Add => {
                self.sessions.enter(chat_id, SessionState::Adding);
                Ok(vec![Reply::Text(ADD_PROMPT.to_string())])
            }
            Command::Remove(args) => Ok(vec![Reply::Text(self.remove(&args).await)]),
            Command::Export => self.export().await,
        }
    }

    /// /list: fresh snapshot with per-record days left.
    async fn list(&self) -> String {
        let users = self.store.fetch().await;
        if users.is_empty() {
            return "No users found.".to_string();
        }

        let today = Utc::now().date_naive();
        let mut reply = String::from("📋 *Approved Users:*\n");
        for user in &users {
            let days = user.days_left(today);
            reply.push_str(&format!(
                "🆔 {} | 👤 {} | ⏳ {} days left\n",
                user.id, user.username, days
            ));
        }
        reply
    }

    /// /summary: active/expired partition over a fresh snapshot.
    async fn summary(&self) -> String {
        let users = self.store.fetch().await;
        let today = Utc::now().date_naive();
        let (total, active, expired) = summarize(&users, today);

        format!(
            "📊 *Summary Dashboard:*\n\
             Total users: {}\n\
             Active: {}\n\
             Expired: {}\n\
             Last updated: {}",
            total,
            active,
            expired,
            Utc::now().format("%Y-%m-%d %H:%M:%S")
        )
    }

    /// /remove <id>: filter by id, store only if something matched.
    async fn remove(&self, args: &[String]) -> String {
        let [device_id] = args else {
            return "Usage: `/remove <device_id>`".to_string();
        };

        let users = self.store.fetch().await;
        let updated: Vec<UserRecord> = users
            .iter()
            .filter(|u| u.id != *device_id)
            .cloned()
            .collect();

        if updated.len() == users.len() {
            return "❌ User not found.".to_string();
        }

        if self.store.store(&updated).await {
            "✅ User removed successfully.".to_string()
        } else {
            "❌ Failed to update database.".to_string()
        }
    }

    /// /export: one delimited line per record, written locally and sent back
    /// as a document.
    async fn export(&self) -> Result<Vec<Reply>> {
        let users = self.store.fetch().await;
        if users.is_empty() {
            return Ok(vec![Reply::Text("No users found.".to_string())]);
        }

        let today = Utc::now().date_naive();
        let rendered = render_export(&users, today);
        std::fs::write(&self.export_path, &rendered)?;

        let filename = std::path::Path::new(&self.export_path)
            .file_name()
            .map(|f| f.to_string_lossy().into_owned())
            .unwrap_or_else(|| "exported_users.txt".to_string());

        Ok(vec![Reply::Document {
            filename,
            bytes: rendered.into_bytes(),
        }])
    }

    /// Follow-up message while the chat is in the add flow.
    async fn handle_add_input(&self, chat_id: i64, text: &str) -> Result<Vec<Reply>> {
        // Field-count check needs no snapshot; everything else does.
        if text.split(',').count() != 5 {
            // Self-loop: stay in Adding and re-prompt.
            return Ok(vec![Reply::Text(ADD_FORMAT_ERROR.to_string())]);
        }

        let mut users = self.store.fetch().await;

        match session::evaluate_add(text, &users) {
            AddOutcome::Malformed => Ok(vec![Reply::Text(ADD_FORMAT_ERROR.to_string())]),
            AddOutcome::DuplicateId(_) => {
                self.sessions.end(chat_id);
                Ok(vec![Reply::Text(
                    "❌ This device ID already exists.".to_string(),
                )])
            }
            AddOutcome::InvalidDate(date) => {
                self.sessions.end(chat_id);
                Ok(vec![Reply::Text(format!(
                    "❌ Invalid expiry date `{}`. Use YYYY-MM-DD.",
                    date
                ))])
            }
            AddOutcome::Accepted(record) => {
                self.sessions.end(chat_id);
                let username = record.username.clone();
                users.push(record);

                if self.store.store(&users).await {
                    Ok(vec![Reply::Text(format!(
                        "✅ User `{}` added successfully!",
                        username
                    ))])
                } else {
                    Ok(vec![Reply::Text("❌ Failed to update database.".to_string())])
                }
            }
        }
    }
}

/// Partition a snapshot into (total, active, expired) counts.
///
/// Expired means strictly negative days left, which also sweeps in records
/// with unparsable dates via the sentinel.
pub fn summarize(users: &[UserRecord], today: NaiveDate) -> (usize, usize, usize) {
    let total = users.len();
    let expired = users.iter().filter(|u| u.days_left(today) < 0).count();
    (total, total - expired, expired)
}

/// Render the export document: one delimited line per record.
pub fn render_export(users: &[UserRecord], today: NaiveDate) -> String {
    users
        .iter()
        .map(|u| {
            format!(
                "{}, {}, {}, {}, {} days left",
                u.id,
                u.username,
                u.expires_at,
                u.allow_offline,
                u.days_left(today)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn generate_reply() -> String {
    format!(
        "✅ *Generated Account:*\n👤 Username: `{}`\n🔒 Password: `{}`",
        generate::generate_username(),
        generate::generate_password()
    )
}
