//! Basic bot commands (help, fallback)

use crate::constants::messages;
use crate::error::BotResult;
use crate::reply::Replier;
use crate::types::Command;
use teloxide::utils::command::BotCommands;

/// Display help message with available commands
pub async fn help(replier: &dyn Replier) -> BotResult<()> {
    replier.text(&Command::descriptions().to_string()).await
}

/// Reply to anything that is not a known command
pub async fn unrecognized(replier: &dyn Replier) -> BotResult<()> {
    replier.text(messages::UNRECOGNIZED).await
}
