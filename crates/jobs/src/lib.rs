//! External jobs launched on behalf of chat commands
//!
//! This crate owns everything that runs outside the bot process: the
//! process runner, the aria2c downloader and ffmpeg transcoder argument
//! sets, magnet-link validation, and the per-operation lock tables that
//! stop the same resource from being worked on twice at once.

pub mod aria2;
pub mod ffmpeg;
pub mod locks;
pub mod magnet;
pub mod runner;

pub use aria2::{Aria2Options, Downloader};
pub use ffmpeg::{TranscodeOptions, Transcoder};
pub use locks::{LockGuard, OperationLocks};
pub use magnet::{InvalidMagnet, MagnetLink};
pub use runner::{ProcessOutput, ProcessRunner, RunError, TokioRunner};
