//! Torrent downloads (`/download`)

use jobs::MagnetLink;

use crate::constants::{messages, usage};
use crate::error::BotResult;
use crate::handlers;
use crate::reply::Replier;
use crate::state::BotState;
use crate::utils;

/// Download a magnet link with aria2c and relay its output
///
/// A second request for a link that is still downloading is refused.
pub async fn download(state: &BotState, replier: &dyn Replier, arg: Option<&str>) -> BotResult<()> {
    let Some(arg) = arg else {
        replier.text(usage::DOWNLOAD).await?;
        return Ok(());
    };

    let link = match MagnetLink::parse(arg) {
        Ok(link) => link,
        Err(_) => {
            tracing::warn!("Rejected invalid magnet link");
            replier.text(messages::INVALID_MAGNET).await?;
            return Ok(());
        }
    };

    let Some(guard) = state.downloads.try_acquire(link.as_str()) else {
        replier.text(messages::ALREADY_DOWNLOADING).await?;
        return Ok(());
    };

    replier
        .markdown(&format!(
            "Downloading torrent from magnet link: `{}`",
            utils::escape_markdown_v2(link.as_str())
        ))
        .await?;

    let result = state.downloader.download(&link).await;
    drop(guard);

    handlers::report_process_result(
        &state.relay,
        replier,
        "Download",
        result,
        messages::DOWNLOAD_FAILED,
    )
    .await
}
