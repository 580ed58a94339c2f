pub mod auth;
pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod handlers;
pub mod relay;
pub mod reply;
pub mod state;
pub mod telegram;
pub mod types;
pub mod utils;

#[cfg(test)]
mod testing;

pub use auth::AllowedUsers;
pub use config::{BotConfig, ConfigError, LogFormat};
pub use error::{BotError, BotResult};
pub use relay::ReplyRelay;
pub use reply::{Replier, TelegramReplier, UploadBot};
pub use state::BotState;
pub use types::{Command, HandlerResult};
