//! In-memory transport and process fakes for handler tests

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jobs::{ProcessOutput, ProcessRunner, RunError};
use storage::DownloadRoot;
use tokio::sync::Notify;

use crate::config::BotConfig;
use crate::error::{BotError, BotResult};
use crate::reply::Replier;
use crate::state::BotState;

pub const ALLOWED_USER: u64 = 1001;
pub const STRANGER: u64 = 666;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sent {
    Text(String),
    Markdown(String),
    Document { path: PathBuf, caption: String },
}

#[derive(Default)]
pub struct RecordingReplier {
    sent: Mutex<Vec<Sent>>,
    fail_documents: bool,
}

impl RecordingReplier {
    pub fn failing_documents() -> Self {
        Self {
            fail_documents: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter_map(|s| match s {
                Sent::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Replier for RecordingReplier {
    async fn text(&self, text: &str) -> BotResult<()> {
        self.sent.lock().unwrap().push(Sent::Text(text.to_string()));
        Ok(())
    }

    async fn markdown(&self, text: &str) -> BotResult<()> {
        self.sent.lock().unwrap().push(Sent::Markdown(text.to_string()));
        Ok(())
    }

    async fn document(&self, path: &Path, caption: &str) -> BotResult<()> {
        if self.fail_documents {
            return Err(BotError::Message("upload timed out".to_string()));
        }
        self.sent.lock().unwrap().push(Sent::Document {
            path: path.to_path_buf(),
            caption: caption.to_string(),
        });
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub program: String,
    pub args: Vec<String>,
}

/// What the fake runner does when called
pub enum Script {
    Exit {
        code: i32,
        stdout: &'static str,
        stderr: &'static str,
    },
    LaunchFailure,
}

/// Records calls and answers from a script
///
/// With a gate set, `run` signals `entered` and then parks until `release`
/// is notified, which lets tests observe an operation while it is running.
pub struct ScriptedRunner {
    script: Script,
    calls: Mutex<Vec<Call>>,
    gate: Option<(Arc<Notify>, Arc<Notify>)>,
    on_run: Mutex<Option<Box<dyn FnMut() + Send>>>,
}

impl ScriptedRunner {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            calls: Mutex::new(Vec::new()),
            gate: None,
            on_run: Mutex::new(None),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(Script::Exit {
            code: 0,
            stdout: "ok",
            stderr: "",
        })
    }

    pub fn gated(script: Script, entered: Arc<Notify>, release: Arc<Notify>) -> Self {
        Self {
            gate: Some((entered, release)),
            ..Self::new(script)
        }
    }

    /// Run `hook` inside every `run`, before the scripted answer
    pub fn on_run(&self, hook: impl FnMut() + Send + 'static) {
        *self.on_run.lock().unwrap() = Some(Box::new(hook));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<ProcessOutput, RunError> {
        self.calls.lock().unwrap().push(Call {
            program: program.to_string(),
            args: args.to_vec(),
        });
        {
            let mut hook = self.on_run.lock().unwrap();
            if let Some(hook) = hook.as_mut() {
                hook();
            }
        }
        if let Some((entered, release)) = &self.gate {
            entered.notify_one();
            release.notified().await;
        }

        match &self.script {
            Script::Exit {
                code,
                stdout,
                stderr,
            } => Ok(ProcessOutput {
                exit_code: Some(*code),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            }),
            Script::LaunchFailure => Err(RunError::Launch {
                program: program.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            }),
        }
    }
}

/// Bot state over a scratch download root and the given runner
pub fn fixture(runner: Arc<ScriptedRunner>) -> (tempfile::TempDir, BotState) {
    let dir = tempfile::tempdir().unwrap();
    let vars: HashMap<&str, String> = HashMap::from([
        ("TELEGRAM_BOT_TOKEN", "123:test".to_string()),
        ("ALLOWED_USERS", ALLOWED_USER.to_string()),
        ("DOWNLOAD_DIR", dir.path().display().to_string()),
        ("ARIA2_CONF", "/etc/aria2.conf".to_string()),
    ]);
    let config = BotConfig::from_lookup(|name| vars.get(name).cloned()).unwrap();
    let root = DownloadRoot::open(&config.download_dir).unwrap();
    let state = BotState::new(&config, root, runner);
    (dir, state)
}

/// Create a file (and its parents) under the download root
pub fn write_file(state: &BotState, name: &str, contents: &[u8]) -> PathBuf {
    let path = state.root.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, contents).unwrap();
    path
}
