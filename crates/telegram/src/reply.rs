//! Outbound side of the chat transport
//!
//! Command handlers only talk to the chat through [`Replier`]; the teloxide
//! implementation threads every reply to the triggering message.

use std::path::Path;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{InputFile, MessageId, ParseMode};

use crate::error::BotResult;

/// Replies addressed to one triggering message
#[async_trait]
pub trait Replier: Send + Sync {
    /// Plain text reply
    async fn text(&self, text: &str) -> BotResult<()>;
    /// MarkdownV2 reply; the caller is responsible for escaping
    async fn markdown(&self, text: &str) -> BotResult<()>;
    /// Upload a file as a document attachment
    async fn document(&self, path: &Path, caption: &str) -> BotResult<()>;
}

/// Bot whose HTTP client carries the extended upload timeout
#[derive(Clone)]
pub struct UploadBot(pub Bot);

/// [`Replier`] that answers a Telegram message in-thread
pub struct TelegramReplier {
    bot: Bot,
    uploader: UploadBot,
    chat_id: ChatId,
    message_id: MessageId,
}

impl TelegramReplier {
    pub fn new(bot: Bot, uploader: UploadBot, msg: &Message) -> Self {
        Self {
            bot,
            uploader,
            chat_id: msg.chat.id,
            message_id: msg.id,
        }
    }
}

#[async_trait]
impl Replier for TelegramReplier {
    async fn text(&self, text: &str) -> BotResult<()> {
        self.bot
            .send_message(self.chat_id, text)
            .reply_to_message_id(self.message_id)
            .await?;
        Ok(())
    }

    async fn markdown(&self, text: &str) -> BotResult<()> {
        self.bot
            .send_message(self.chat_id, text)
            .parse_mode(ParseMode::MarkdownV2)
            .reply_to_message_id(self.message_id)
            .await?;
        Ok(())
    }

    async fn document(&self, path: &Path, caption: &str) -> BotResult<()> {
        self.uploader
            .0
            .send_document(self.chat_id, InputFile::file(path.to_path_buf()))
            .caption(caption)
            .reply_to_message_id(self.message_id)
            .await?;
        Ok(())
    }
}
