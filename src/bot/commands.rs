//! Command handling: `/start` and `/getid`

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::utils::command::{BotCommands, ParseError};
use teloxide::utils::markdown;
use tracing::{debug, info, warn};

use crate::event_log::{EventLog, Interactor};
use crate::localization::{t_args_lang, t_lang};

use super::resolver::HandleResolver;
use super::track;
use super::ui_builder::{main_menu_keyboard, welcome_text, Reply};
use super::{SharedLog, SharedResolver};

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "Запустить бота")]
    Start,
    #[command(description = "Получить ID по @username", parse_with = raw_argument)]
    GetId(String),
}

/// Keep the argument as typed so `/getid` without one still reaches the handler
fn raw_argument(input: String) -> Result<(String,), ParseError> {
    Ok((input,))
}

/// First argument of `/getid` if it looks like a public handle
pub fn parse_handle(args: &str) -> Option<&str> {
    args.split_whitespace()
        .next()
        .filter(|handle| handle.len() > 1 && handle.starts_with('@'))
}

/// Record the greeting and build the welcome message with the main menu
pub async fn start_reply(log: &dyn EventLog, user: &Interactor, language_code: Option<&str>) -> Reply {
    track(log, user, "start").await;
    Reply::text(welcome_text(language_code)).with_keyboard(main_menu_keyboard(language_code))
}

/// Resolve the handle in `args` and describe the outcome for the user
pub async fn getid_reply(resolver: &dyn HandleResolver, args: &str, language_code: Option<&str>) -> Reply {
    let Some(handle) = parse_handle(args) else {
        return Reply::text(t_lang("getid-usage", language_code));
    };

    match resolver.resolve(handle).await {
        Ok(id) => {
            debug!(handle, id, "Resolved handle");
            let handle = markdown::escape(handle);
            let id = markdown::code_inline(&id.to_string());
            let text = t_args_lang(
                "getid-result",
                &[("handle", handle.as_str()), ("id", id.as_str())],
                language_code,
            );
            Reply::text(text).markdown()
        }
        Err(e) => {
            info!(handle, error = %e, "Handle resolution failed");
            let error = e.to_string();
            Reply::text(t_args_lang("getid-failed", &[("error", error.as_str())], language_code))
        }
    }
}

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    log: SharedLog,
    resolver: SharedResolver,
) -> Result<()> {
    let language_code = msg.from.as_ref().and_then(|user| user.language_code.as_deref());
    debug!(chat_id = %msg.chat.id, command = ?cmd, "Received command");

    let reply = match cmd {
        Command::Start => match &msg.from {
            Some(from) => start_reply(log.as_ref(), &Interactor::from(from), language_code).await,
            None => {
                warn!(chat_id = %msg.chat.id, "/start without a sender, not recorded");
                Reply::text(welcome_text(language_code)).with_keyboard(main_menu_keyboard(language_code))
            }
        },
        Command::GetId(args) => getid_reply(resolver.as_ref(), &args, language_code).await,
    };

    let mut request = bot.send_message(msg.chat.id, reply.text);
    if let Some(keyboard) = reply.keyboard {
        request = request.reply_markup(keyboard);
    }
    if let Some(parse_mode) = reply.parse_mode {
        request = request.parse_mode(parse_mode);
    }
    request.await?;

    Ok(())
}
