// SPDX-License-Identifier: MIT

//! Login Directory Bot
//!
//! Long-polls the Telegram Bot API for operator commands and manages a user
//! directory stored as a JSON document in a GitHub repository. A minimal
//! health endpoint keeps the hosting platform's port probe happy.

use loginid_bot::{
    commands::{Dispatcher, Reply},
    config::Config,
    store::DirectoryStore,
    telegram::TelegramClient,
};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Server-side long-poll window for getUpdates.
const POLL_TIMEOUT_SECS: u32 = 30;

/// Pause after a failed getUpdates call before polling again.
const POLL_RETRY_DELAY: Duration = Duration::from_secs(3);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting login directory bot");

    let store = DirectoryStore::new(
        config.directory_raw_url.clone(),
        config.directory_api_url.clone(),
        config.github_token.clone(),
    );
    let telegram = TelegramClient::new(config.telegram_bot_token.clone());
    let dispatcher = Dispatcher::new(store, config.export_path.clone());

    // Health endpoint runs as an independent task, sharing no state with the bot.
    let app = loginid_bot::routes::create_router();
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Health endpoint listening");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "Health server exited");
        }
    });

    run_polling(telegram, dispatcher).await
}

/// Poll for updates and dispatch them until the process is stopped.
///
/// A failure inside one command handler is logged and reported to that chat;
/// it never takes the loop down.
async fn run_polling(
    telegram: TelegramClient,
    dispatcher: Dispatcher,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut offset: i64 = 0;
    tracing::info!("Bot is polling");

    loop {
        let updates = match telegram.get_updates(offset, POLL_TIMEOUT_SECS).await {
            Ok(updates) => updates,
            Err(e) => {
                tracing::warn!(error = %e, "getUpdates failed, retrying");
                tokio::time::sleep(POLL_RETRY_DELAY).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);

            let Some(message) = update.message else {
                continue;
            };
            let Some(text) = message.text else {
                continue;
            };
            let chat_id = message.chat.id;

            match dispatcher.handle_message(chat_id, &text).await {
                Ok(replies) => {
                    for reply in replies {
                        let sent = match reply {
                            Reply::Text(text) => telegram.send_message(chat_id, &text).await,
                            Reply::Document { filename, bytes } => {
                                telegram.send_document(chat_id, &filename, bytes).await
                            }
                        };
                        if let Err(e) = sent {
                            tracing::warn!(error = %e, chat_id, "Failed to send reply");
                        }
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, chat_id, "Command handler failed");
                    let _ = telegram
                        .send_message(chat_id, &format!("❌ Error: {}", e))
                        .await;
                }
            }
        }
    }
}

/// Initialize logging with env-filter overrides.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("loginid_bot=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
