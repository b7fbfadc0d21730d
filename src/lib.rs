// SPDX-License-Identifier: MIT

//! Login directory bot.
//!
//! A Telegram bot that manages a small directory of login user records. The
//! directory's source of truth is a single JSON document in a GitHub
//! repository, read over the raw-content URL and written back through the
//! contents API with an optimistic-concurrency SHA check.

pub mod commands;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod telegram;
