//! Shared state injected into every handler

use std::sync::Arc;

use jobs::{Aria2Options, Downloader, OperationLocks, ProcessRunner, TranscodeOptions, Transcoder};
use storage::DownloadRoot;

use crate::auth::AllowedUsers;
use crate::config::BotConfig;
use crate::relay::ReplyRelay;

/// Process-wide bot state
///
/// Cheap to clone; the lock tables are shared between clones.
#[derive(Clone)]
pub struct BotState {
    pub allowed: AllowedUsers,
    pub root: DownloadRoot,
    pub downloads: OperationLocks,
    pub compressions: OperationLocks,
    pub downloader: Downloader,
    pub transcoder: Transcoder,
    pub relay: ReplyRelay,
    pub send_max_bytes: u64,
}

impl BotState {
    pub fn new(
        config: &BotConfig,
        root: DownloadRoot,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        let aria2 = Aria2Options {
            program: config.aria2_bin.clone(),
            download_dir: root.path().to_path_buf(),
            conf_path: config.aria2_conf.clone(),
        };
        let transcode = TranscodeOptions {
            program: config.ffmpeg_bin.clone(),
            ..TranscodeOptions::default()
        };

        Self {
            allowed: config.allowed_users.clone(),
            downloads: OperationLocks::new("download"),
            compressions: OperationLocks::new("compress"),
            downloader: Downloader::new(runner.clone(), aria2),
            transcoder: Transcoder::new(runner, transcode),
            relay: ReplyRelay::new(config.reply_chunk_length),
            send_max_bytes: config.send_max_bytes,
            root,
        }
    }
}
