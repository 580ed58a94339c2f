use std::time::Duration;

use crate::auth;
use crate::commands;
use crate::error::BotError;
use crate::reply::{TelegramReplier, UploadBot};
use crate::state::BotState;
use crate::types::{Command, HandlerResult};
use crate::utils;
use teloxide::{dispatching::UpdateHandler, prelude::*, utils::command::BotCommands};

/// Register bot commands in Telegram menu
pub async fn set_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;
    Ok(())
}

/// Build the bot used for document uploads
///
/// Uploads of large files take far longer than the default request timeout,
/// so this bot gets its own HTTP client.
pub fn upload_bot(token: &str, timeout: Duration) -> Result<UploadBot, BotError> {
    let client = teloxide::net::default_reqwest_settings()
        .timeout(timeout)
        .build()
        .map_err(|e| BotError::Message(format!("failed to build upload client: {}", e)))?;
    Ok(UploadBot(Bot::with_client(token, client)))
}

pub fn schema() -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
    let command_handler = teloxide::filter_command::<Command, _>().endpoint(handle_command);

    Update::filter_message()
        .branch(command_handler)
        .branch(
            dptree::filter(|msg: Message| utils::looks_like_command(msg.text()))
                .endpoint(unrecognized),
        )
}

fn sender_id(msg: &Message) -> Option<u64> {
    msg.from().map(|user| user.id.0)
}

async fn handle_command(
    bot: Bot,
    uploader: UploadBot,
    msg: Message,
    cmd: Command,
    state: BotState,
) -> HandlerResult {
    let replier = TelegramReplier::new(bot, uploader, &msg);
    let text = msg.text().unwrap_or_default();
    commands::dispatch(&state, &replier, sender_id(&msg), cmd, text).await?;
    Ok(())
}

async fn unrecognized(bot: Bot, uploader: UploadBot, msg: Message, state: BotState) -> HandlerResult {
    let replier = TelegramReplier::new(bot, uploader, &msg);
    if auth::authorize(&state.allowed, sender_id(&msg), &replier).await? {
        commands::unrecognized(&replier).await?;
    }
    Ok(())
}
