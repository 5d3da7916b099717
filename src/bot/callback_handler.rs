//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{debug, error, warn};

use crate::event_log::{EventLog, Interactor};

use super::track;
use super::ui_builder::{back_keyboard, cases_text, contact_text, main_menu_keyboard, welcome_text, Reply};
use super::SharedLog;

/// Inline buttons the bot shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Cases,
    Contact,
    Back,
}

impl MenuAction {
    pub fn from_callback_data(data: &str) -> Option<Self> {
        match data {
            "cases" => Some(Self::Cases),
            "contact" => Some(Self::Contact),
            "back" => Some(Self::Back),
            _ => None,
        }
    }

    pub fn callback_data(self) -> &'static str {
        self.event_label()
    }

    /// Label stored in the event log when the button is pressed
    pub fn event_label(self) -> &'static str {
        match self {
            Self::Cases => "cases",
            Self::Contact => "contact",
            Self::Back => "back",
        }
    }
}

/// Record the button press and build the message it leads to
pub async fn menu_reply(
    log: &dyn EventLog,
    user: &Interactor,
    action: MenuAction,
    language_code: Option<&str>,
) -> Reply {
    track(log, user, action.event_label()).await;

    match action {
        MenuAction::Cases => Reply::text(cases_text(language_code)).with_keyboard(back_keyboard(language_code)),
        MenuAction::Contact => {
            Reply::text(contact_text(language_code)).with_keyboard(back_keyboard(language_code))
        }
        MenuAction::Back => {
            Reply::text(welcome_text(language_code)).with_keyboard(main_menu_keyboard(language_code))
        }
    }
}

/// Handle callback queries from inline keyboards
pub async fn callback_handler(bot: Bot, q: CallbackQuery, log: SharedLog) -> Result<()> {
    debug!(user_id = %q.from.id, data = ?q.data, "Received callback query from user");

    // Answer first so the client drops its loading indicator
    if let Err(e) = bot.answer_callback_query(q.id.clone()).await {
        warn!(user_id = %q.from.id, error = %e, "Failed to answer callback query");
    }

    let data = q.data.as_deref().unwrap_or("");
    let Some(action) = MenuAction::from_callback_data(data) else {
        warn!(user_id = %q.from.id, data, "Ignoring unknown callback data");
        return Ok(());
    };

    let language_code = q.from.language_code.as_deref();
    let user = Interactor::from(&q.from);
    let reply = menu_reply(log.as_ref(), &user, action, language_code).await;

    if let Some(msg) = &q.message {
        let mut request = bot.edit_message_text(msg.chat().id, msg.id(), reply.text);
        if let Some(keyboard) = reply.keyboard {
            request = request.reply_markup(keyboard);
        }
        if let Err(e) = request.await {
            error!(user_id = %q.from.id, error = %e, "Failed to edit message for menu action");
        }
    }

    Ok(())
}
