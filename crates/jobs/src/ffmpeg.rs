//! Video compression through ffmpeg

use crate::runner::{ProcessOutput, ProcessRunner, RunError};
use std::path::Path;
use std::sync::Arc;

/// Fixed ffmpeg encoding settings
#[derive(Debug, Clone)]
pub struct TranscodeOptions {
    pub program: String,
    /// Target width; height follows the source aspect ratio
    pub width: u32,
    pub codec: String,
    pub crf: u8,
    pub preset: String,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            width: 1080,
            codec: "libx264".to_string(),
            crf: 23,
            preset: "veryfast".to_string(),
        }
    }
}

impl TranscodeOptions {
    /// Argument vector for compressing `source` into `destination`
    pub fn args(&self, source: &Path, destination: &Path) -> Vec<String> {
        vec![
            "-i".to_string(),
            source.display().to_string(),
            "-vf".to_string(),
            format!("scale={}:-1", self.width),
            "-c:v".to_string(),
            self.codec.clone(),
            "-crf".to_string(),
            self.crf.to_string(),
            "-preset".to_string(),
            self.preset.clone(),
            destination.display().to_string(),
        ]
    }
}

/// Runs ffmpeg transcodes through a [`ProcessRunner`]
#[derive(Clone)]
pub struct Transcoder {
    runner: Arc<dyn ProcessRunner>,
    options: TranscodeOptions,
}

impl Transcoder {
    pub fn new(runner: Arc<dyn ProcessRunner>, options: TranscodeOptions) -> Self {
        Self { runner, options }
    }

    pub async fn compress(
        &self,
        source: &Path,
        destination: &Path,
    ) -> Result<ProcessOutput, RunError> {
        tracing::info!(
            "Compressing {} into {}",
            source.display(),
            destination.display()
        );
        let args = self.options.args(source, destination);
        self.runner.run(&self.options.program, &args).await
    }
}
