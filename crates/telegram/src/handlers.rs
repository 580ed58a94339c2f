//! Command handler helper functions
//!
//! Reusable steps shared by the file and process commands: resolving a
//! filename argument to an existing file, and reporting how an external
//! process ended.

use std::fs::Metadata;
use std::path::PathBuf;

use jobs::{ProcessOutput, RunError};
use storage::StorageError;

use crate::error::BotResult;
use crate::relay::ReplyRelay;
use crate::reply::Replier;
use crate::state::BotState;

/// Resolve `name` to an existing regular file under the download root
///
/// Replies with the usage text, an invalid-name or a not-found message and
/// returns `None` when there is nothing to operate on.
pub async fn existing_file(
    state: &BotState,
    replier: &dyn Replier,
    name: &str,
    usage_msg: &str,
) -> BotResult<Option<(PathBuf, Metadata)>> {
    let path = match state.root.resolve(name) {
        Ok(path) => path,
        Err(StorageError::EmptyName) => {
            replier.text(usage_msg).await?;
            return Ok(None);
        }
        Err(err) => {
            tracing::warn!("Rejected file name {:?}: {}", name, err);
            replier.text(&format!("Invalid file name: {}", name)).await?;
            return Ok(None);
        }
    };

    match state.root.stat(&path).await {
        Ok(Some(meta)) if meta.is_file() => Ok(Some((path, meta))),
        Ok(Some(_)) => {
            replier.text(&format!("Not a file: {}", name)).await?;
            Ok(None)
        }
        Ok(None) => {
            replier.text(&format!("File not found: {}", name)).await?;
            Ok(None)
        }
        Err(err) => {
            tracing::error!("Failed to inspect {}: {}", path.display(), err);
            replier.text(&format!("Error reading file: {}", name)).await?;
            Ok(None)
        }
    }
}

/// Report the outcome of an external process to the chat
///
/// Captured output is relayed for both clean and non-zero exits; a non-zero
/// exit adds a failure line. When the process could not be run at all only
/// `launch_failure_msg` is sent.
pub async fn report_process_result(
    relay: &ReplyRelay,
    replier: &dyn Replier,
    operation: &str,
    result: Result<ProcessOutput, RunError>,
    launch_failure_msg: &str,
) -> BotResult<()> {
    match result {
        Ok(output) if output.success() => relay.relay_output(replier, &output).await,
        Ok(output) => {
            tracing::warn!("{} exited unsuccessfully: {:?}", operation, output.exit_code);
            relay.relay_output(replier, &output).await?;
            let msg = match output.exit_code {
                Some(code) => format!("{} failed (exit code {}).", operation, code),
                None => format!("{} failed (terminated by signal).", operation),
            };
            replier.text(&msg).await
        }
        Err(err) => {
            tracing::error!("{} could not run: {}", operation, err);
            replier.text(launch_failure_msg).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixture, write_file, RecordingReplier, ScriptedRunner};
    use std::sync::Arc;

    fn output(code: Option<i32>, stdout: &str, stderr: &str) -> ProcessOutput {
        ProcessOutput {
            exit_code: code,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    #[tokio::test]
    async fn test_report_success() {
        let replier = RecordingReplier::default();
        report_process_result(&ReplyRelay::default(), &replier, "Download", Ok(output(Some(0), "fine", "")), "Download failed.")
            .await
            .unwrap();
        assert_eq!(replier.texts(), vec!["Output: fine"]);
    }

    #[tokio::test]
    async fn test_report_nonzero_exit() {
        let replier = RecordingReplier::default();
        report_process_result(&ReplyRelay::default(), &replier, "Download", Ok(output(Some(7), "", "bad torrent")), "Download failed.")
            .await
            .unwrap();
        assert_eq!(
            replier.texts(),
            vec!["Error: bad torrent", "Output: ", "Download failed (exit code 7)."]
        );
    }

    #[tokio::test]
    async fn test_report_signal() {
        let replier = RecordingReplier::default();
        report_process_result(&ReplyRelay::default(), &replier, "Compress", Ok(output(None, "", "")), "x")
            .await
            .unwrap();
        assert_eq!(
            replier.texts().last().unwrap(),
            "Compress failed (terminated by signal)."
        );
    }

    #[tokio::test]
    async fn test_report_launch_failure() {
        let replier = RecordingReplier::default();
        let err = RunError::Launch {
            program: "aria2c".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        report_process_result(&ReplyRelay::default(), &replier, "Download", Err(err), "Download failed.")
            .await
            .unwrap();
        assert_eq!(replier.texts(), vec!["Download failed."]);
    }

    #[tokio::test]
    async fn test_existing_file_cases() {
        let (_dir, state) = fixture(Arc::new(ScriptedRunner::succeeding()));
        write_file(&state, "present.txt", b"abc");
        std::fs::create_dir_all(state.root.path().join("folder")).unwrap();

        let replier = RecordingReplier::default();
        let found = existing_file(&state, &replier, "present.txt", "usage").await.unwrap();
        let (path, meta) = found.unwrap();
        assert_eq!(path, state.root.path().join("present.txt"));
        assert_eq!(meta.len(), 3);
        assert!(replier.sent().is_empty());

        for (name, expected) in [
            ("", "usage"),
            ("../etc/passwd", "Invalid file name: ../etc/passwd"),
            ("missing.txt", "File not found: missing.txt"),
            ("folder", "Not a file: folder"),
        ] {
            let replier = RecordingReplier::default();
            assert!(existing_file(&state, &replier, name, "usage").await.unwrap().is_none());
            assert_eq!(replier.texts(), vec![expected.to_string()]);
        }
    }
}
