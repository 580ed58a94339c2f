use teloxide::macros::BotCommands;

/// Type alias for handler result types
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Available bot commands
///
/// Arguments are read from the raw message text rather than parsed by the
/// derive, so filenames keep their spacing.
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "Display help information")]
    Help,
    #[command(description = "Download a torrent: /download <magnet_link>")]
    Download,
    #[command(description = "List the latest downloads, or everything with /ls all")]
    Ls,
    #[command(description = "Delete a downloaded file: /rm <filename>")]
    Rm,
    #[command(rename = "send", description = "Send a downloaded file: /send <filename>")]
    SendFile,
    #[command(description = "Compress a video: /compress <filename>")]
    Compress,
}
