//! Video compression (`/compress`)

use crate::constants::usage;
use crate::error::BotResult;
use crate::handlers;
use crate::reply::Replier;
use crate::state::BotState;
use crate::utils;

/// Compress a downloaded video into `compressed_<name>` next to it
///
/// The compress lock for `name` is held from the first check until ffmpeg
/// exits and is released on every path out of this function.
pub async fn compress(state: &BotState, replier: &dyn Replier, name: &str) -> BotResult<()> {
    if name.is_empty() {
        replier.text(usage::COMPRESS).await?;
        return Ok(());
    }

    let Some(guard) = state.compressions.try_acquire(name) else {
        replier
            .text(&format!("File is already being compressed: {}", name))
            .await?;
        return Ok(());
    };

    let Some((source, _)) = handlers::existing_file(state, replier, name, usage::COMPRESS).await? else {
        return Ok(());
    };
    let destination = state.root.compressed_path(name)?;

    match state.root.stat(&destination).await {
        Ok(None) => {}
        Ok(Some(_)) => {
            replier
                .text(&format!(
                    "Compressed file already exists: {}",
                    destination.display()
                ))
                .await?;
            return Ok(());
        }
        Err(err) => {
            tracing::error!("Failed to inspect {}: {}", destination.display(), err);
            replier
                .text(&format!("Error compressing file: {}", name))
                .await?;
            return Ok(());
        }
    }

    replier
        .markdown(&format!(
            "Compressing file: `{}`",
            utils::escape_markdown_v2(name)
        ))
        .await?;

    let result = state.transcoder.compress(&source, &destination).await;
    drop(guard);

    handlers::report_process_result(
        &state.relay,
        replier,
        "Compress",
        result,
        &format!("Error compressing file: {}", name),
    )
    .await
}
