//! Torrent downloads through aria2c

use crate::magnet::MagnetLink;
use crate::runner::{ProcessOutput, ProcessRunner, RunError};
use std::path::PathBuf;
use std::sync::Arc;

/// Fixed aria2c invocation settings
#[derive(Debug, Clone)]
pub struct Aria2Options {
    /// Program to launch, `aria2c` unless overridden
    pub program: String,
    /// Directory downloads are written into
    pub download_dir: PathBuf,
    /// Optional aria2c configuration file
    pub conf_path: Option<PathBuf>,
}

impl Aria2Options {
    pub fn new(download_dir: PathBuf) -> Self {
        Self {
            program: "aria2c".to_string(),
            download_dir,
            conf_path: None,
        }
    }

    /// Argument vector for downloading `link`
    ///
    /// Only the link itself comes from the user; every flag is fixed.
    pub fn args(&self, link: &MagnetLink) -> Vec<String> {
        let mut args = vec![
            "-x".to_string(),
            "16".to_string(),
            "-s".to_string(),
            "16".to_string(),
            format!("--dir={}", self.download_dir.display()),
        ];
        if let Some(conf) = &self.conf_path {
            args.push("--conf-path".to_string());
            args.push(conf.display().to_string());
        }
        args.extend([
            "--seed-time=0".to_string(),
            "--summary-interval=0".to_string(),
            "--disable-ipv6".to_string(),
            link.as_str().to_string(),
        ]);
        args
    }
}

/// Runs aria2c downloads through a [`ProcessRunner`]
#[derive(Clone)]
pub struct Downloader {
    runner: Arc<dyn ProcessRunner>,
    options: Aria2Options,
}

impl Downloader {
    pub fn new(runner: Arc<dyn ProcessRunner>, options: Aria2Options) -> Self {
        Self { runner, options }
    }

    /// Download `link` and wait for aria2c to exit
    pub async fn download(&self, link: &MagnetLink) -> Result<ProcessOutput, RunError> {
        tracing::info!("Starting download for btih {}", link.info_hash());
        let args = self.options.args(link);
        self.runner.run(&self.options.program, &args).await
    }
}
