//! Command handlers for the Telegram bot
//!
//! This module contains all command handler functions organized by category:
//! - `basic`: help and the fallback for unrecognised messages
//! - `download`: torrent downloads through aria2c
//! - `files`: listing, deleting and sending downloaded files
//! - `compress`: video compression through ffmpeg
//!
//! Every handler talks to the chat through a [`Replier`] and is reached via
//! [`dispatch`], which runs the permission gate first.

mod basic;
mod compress;
mod download;
mod files;

pub use basic::*;
pub use compress::*;
pub use download::*;
pub use files::*;

use crate::auth;
use crate::error::BotResult;
use crate::reply::Replier;
use crate::state::BotState;
use crate::types::Command;
use crate::utils;

/// Gate and route one command
///
/// `text` is the full message text including the command token.
pub async fn dispatch(
    state: &BotState,
    replier: &dyn Replier,
    user_id: Option<u64>,
    cmd: Command,
    text: &str,
) -> BotResult<()> {
    if !auth::authorize(&state.allowed, user_id, replier).await? {
        return Ok(());
    }

    tracing::info!("User {:?} issued {:?}", user_id, cmd);
    match cmd {
        Command::Help => help(replier).await,
        Command::Download => download(state, replier, utils::first_argument(text)).await,
        Command::Ls => list(state, replier, utils::first_argument(text)).await,
        Command::Rm => remove(state, replier, utils::command_argument(text)).await,
        Command::SendFile => send_file(state, replier, utils::command_argument(text)).await,
        Command::Compress => compress(state, replier, utils::command_argument(text)).await,
    }
}
