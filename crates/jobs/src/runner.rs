//! External process execution
//!
//! Programs are always started with a discrete argument vector; nothing is
//! ever handed to a shell. Both output streams are collected in full and
//! decoded lossily so that garbage bytes from a child never fail a command.

use async_trait::async_trait;
use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

/// Captured result of a process that ran to completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    /// Whether the process exited with status zero
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Failure to run a process at all
///
/// A non-zero exit is not a `RunError`; it is reported through
/// [`ProcessOutput::success`].
#[derive(Debug, Error)]
pub enum RunError {
    /// The program could not be started (missing binary, permissions, ...)
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// The program started but its completion or output could not be collected
    #[error("failed waiting for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Launches external programs and waits for them to finish
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> Result<ProcessOutput, RunError>;
}

/// [`ProcessRunner`] backed by `tokio::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioRunner;

#[async_trait]
impl ProcessRunner for TokioRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<ProcessOutput, RunError> {
        tracing::info!("Launching {} with {} argument(s)", program, args.len());

        let child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| {
                tracing::error!("Failed to launch {}: {}", program, source);
                RunError::Launch {
                    program: program.to_string(),
                    source,
                }
            })?;

        let output = child.wait_with_output().await.map_err(|source| {
            tracing::error!("Failed waiting for {}: {}", program, source);
            RunError::Wait {
                program: program.to_string(),
                source,
            }
        })?;

        let exit_code = output.status.code();
        tracing::info!("{} exited with code {:?}", program, exit_code);

        Ok(ProcessOutput {
            exit_code,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
