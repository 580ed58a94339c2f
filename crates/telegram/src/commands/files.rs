//! Download directory commands (`/ls`, `/rm`, `/send`)

use storage::ListMode;

use crate::constants::{messages, usage};
use crate::error::BotResult;
use crate::handlers;
use crate::reply::Replier;
use crate::state::BotState;
use crate::utils;

/// List downloaded files, newest first
///
/// `/ls all` lists the whole tree; anything else the latest ten.
pub async fn list(state: &BotState, replier: &dyn Replier, arg: Option<&str>) -> BotResult<()> {
    let mode = ListMode::from_arg(arg.unwrap_or_default());

    // walkdir is blocking; keep it off the runtime workers
    let root = state.root.clone();
    let entries = match tokio::task::spawn_blocking(move || root.list(mode)).await {
        Ok(Ok(entries)) => entries,
        Ok(Err(err)) => {
            tracing::error!("Failed to list downloads: {}", err);
            replier.text("Error listing files.").await?;
            return Ok(());
        }
        Err(err) => {
            tracing::error!("Listing task failed: {}", err);
            replier.text("Error listing files.").await?;
            return Ok(());
        }
    };

    let header = match mode {
        ListMode::All => messages::LIST_ALL_HEADER,
        ListMode::Latest => messages::LIST_LATEST_HEADER,
    };
    let mut response = format!("{}\n", header);
    if entries.is_empty() {
        response.push_str(messages::LIST_EMPTY);
        response.push('\n');
    }
    for entry in &entries {
        response.push_str(&entry.path.display().to_string());
        response.push('\n');
    }

    replier.text(utils::truncate_message(&response)).await
}

/// Delete a file from the download directory
pub async fn remove(state: &BotState, replier: &dyn Replier, name: &str) -> BotResult<()> {
    let Some((path, _)) = handlers::existing_file(state, replier, name, usage::RM).await? else {
        return Ok(());
    };

    match state.root.remove_file(&path).await {
        Ok(()) => replier.text(&format!("File deleted: {}", name)).await,
        Err(err) => {
            tracing::error!("Failed to delete {}: {}", path.display(), err);
            replier.text(&format!("Error deleting file: {}", name)).await
        }
    }
}

/// Send a downloaded file back as a document
pub async fn send_file(state: &BotState, replier: &dyn Replier, name: &str) -> BotResult<()> {
    let Some((path, meta)) = handlers::existing_file(state, replier, name, usage::SEND).await? else {
        return Ok(());
    };

    if meta.len() > state.send_max_bytes {
        replier
            .text(&format!(
                "File too large to send: {} ({})",
                name,
                utils::format_size(meta.len())
            ))
            .await?;
        return Ok(());
    }

    tracing::info!("Uploading {} ({} bytes)", path.display(), meta.len());
    if let Err(err) = replier.document(&path, &format!("File: {}", name)).await {
        tracing::error!("Failed to send {}: {}", path.display(), err);
        replier.text(&format!("Error sending file: {}", name)).await?;
    }
    Ok(())
}
