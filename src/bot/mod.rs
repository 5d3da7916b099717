//! Bot module for handling Telegram interactions
//!
//! - `commands`: `/start` and `/getid`
//! - `callback_handler`: inline keyboard callback queries
//! - `ui_builder`: keyboards and static message content
//! - `resolver`: public handle to numeric id lookup

pub mod callback_handler;
pub mod commands;
pub mod resolver;
pub mod ui_builder;

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::BotCommandScope;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, warn};

use crate::event_log::{EventLog, Interactor};

pub use callback_handler::{callback_handler, menu_reply, MenuAction};
pub use commands::{command_handler, getid_reply, start_reply, Command};
pub use resolver::{HandleResolver, TelegramResolver};
pub use ui_builder::Reply;
pub use crate::event_log::SharedLog;

pub type SharedResolver = Arc<dyn HandleResolver>;

/// Record an interaction without letting a storage failure reach the user
pub async fn track(log: &dyn EventLog, user: &Interactor, event: &str) {
    if let Err(e) = log.record(user, event).await {
        error!(user_id = user.user_id, event, error = %format!("{e:#}"), "Failed to record event");
    }
}

/// Publish the command list shown in the Telegram client menu
pub async fn register_commands(bot: &Bot) {
    match bot
        .set_my_commands(Command::bot_commands())
        .scope(BotCommandScope::Default)
        .await
    {
        Ok(_) => info!("Bot commands registered"),
        Err(e) => warn!(error = %e, "Failed to register bot commands"),
    }
}

/// Run the long-polling dispatcher until ctrl-c
pub async fn run_dispatcher(bot: Bot, log: SharedLog) {
    let resolver: SharedResolver = Arc::new(TelegramResolver::new(bot.clone()));

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(command_handler),
        )
        .branch(Update::filter_callback_query().endpoint(callback_handler));

    info!("Bot initialized, starting dispatcher");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![log, resolver])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
}
