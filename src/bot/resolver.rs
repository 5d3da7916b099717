//! Handle to numeric id resolution

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::Recipient;
use teloxide::{ApiError, RequestError};

use crate::error::ResolveError;

/// Turns a public `@handle` into the numeric id of the chat behind it
#[async_trait]
pub trait HandleResolver: Send + Sync {
    async fn resolve(&self, handle: &str) -> Result<i64, ResolveError>;
}

/// Resolves handles through the Bot API `getChat` method
#[derive(Clone)]
pub struct TelegramResolver {
    bot: Bot,
}

impl TelegramResolver {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl HandleResolver for TelegramResolver {
    async fn resolve(&self, handle: &str) -> Result<i64, ResolveError> {
        match self
            .bot
            .get_chat(Recipient::ChannelUsername(handle.to_string()))
            .await
        {
            Ok(chat) => Ok(chat.id.0),
            Err(RequestError::Api(ApiError::ChatNotFound | ApiError::UserNotFound)) => {
                Err(ResolveError::NotFound(handle.to_string()))
            }
            Err(e) => Err(ResolveError::Transport {
                handle: handle.to_string(),
                message: e.to_string(),
            }),
        }
    }
}
