//! Constants used throughout the telegram bot

/// Default chunk length for relayed process output
pub const DEFAULT_REPLY_CHUNK_LENGTH: usize = 200;

/// Number of chunks relayed per reply; the rest is dropped to avoid flooding
pub const MAX_REPLY_CHUNKS: usize = 2;

/// Telegram's hard limit on message text length
pub const TELEGRAM_MESSAGE_LIMIT: usize = 4096;

/// Default upload timeout for `/send`, in seconds
pub const DEFAULT_SEND_TIMEOUT_SECS: u64 = 6000;

/// Largest file the public Bot API accepts from bots
pub const DEFAULT_SEND_MAX_BYTES: u64 = 50 * 1024 * 1024;

/// User-facing replies
pub mod messages {
    pub const NOT_ALLOWED: &str = "You are not allowed to use this bot.";
    pub const INVALID_MAGNET: &str = "Invalid magnet link.";
    pub const ALREADY_DOWNLOADING: &str = "Already downloading.";
    pub const DOWNLOAD_FAILED: &str = "Download failed.";
    pub const LIST_LATEST_HEADER: &str = "Files in downloads: (latest 10, all?)";
    pub const LIST_ALL_HEADER: &str = "All files in downloads:";
    pub const LIST_EMPTY: &str = "(no files)";
    pub const UNRECOGNIZED: &str = "Unable to handle the message. Type /help to see the usage.";
}

/// Usage messages for commands
pub mod usage {
    pub const DOWNLOAD: &str = "Usage: /download <magnet_link>";
    pub const RM: &str = "Usage: /rm <filename>";
    pub const SEND: &str = "Usage: /send <filename>";
    pub const COMPRESS: &str = "Usage: /compress <filename>";
}
