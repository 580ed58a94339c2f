use thiserror::Error;

/// Custom error type for telegram bot operations
#[derive(Debug, Error)]
pub enum BotError {
    /// Telegram API error
    #[error("Telegram error: {0}")]
    TelegramError(#[from] teloxide::RequestError),
    /// Download directory error
    #[error("Storage error: {0}")]
    StorageError(#[from] storage::StorageError),
    /// Generic error with message
    #[error("{0}")]
    Message(String),
}

/// Result type alias for bot operations
pub type BotResult<T> = Result<T, BotError>;
