//! Chat reply relay for long process output
//!
//! Text is cut into fixed-size chunks and only the first
//! [`MAX_REPLY_CHUNKS`] are sent. Anything beyond that is dropped on
//! purpose so a chatty downloader cannot flood the chat.

use crate::constants::{DEFAULT_REPLY_CHUNK_LENGTH, MAX_REPLY_CHUNKS};
use crate::error::BotResult;
use crate::reply::Replier;
use jobs::ProcessOutput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyRelay {
    chunk_len: usize,
}

impl Default for ReplyRelay {
    fn default() -> Self {
        Self::new(DEFAULT_REPLY_CHUNK_LENGTH)
    }
}

impl ReplyRelay {
    /// A relay cutting text into chunks of `chunk_len` characters
    ///
    /// A zero length is treated as one.
    pub fn new(chunk_len: usize) -> Self {
        Self {
            chunk_len: chunk_len.max(1),
        }
    }

    pub fn chunk_len(&self) -> usize {
        self.chunk_len
    }

    /// The chunks that would be sent for `text`, at most [`MAX_REPLY_CHUNKS`]
    ///
    /// Lengths are counted in characters, never splitting a code point.
    pub fn chunks(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::with_capacity(MAX_REPLY_CHUNKS);
        let mut chars = text.chars().peekable();
        while chunks.len() < MAX_REPLY_CHUNKS && chars.peek().is_some() {
            chunks.push(chars.by_ref().take(self.chunk_len).collect());
        }
        chunks
    }

    /// Send `text` as up to [`MAX_REPLY_CHUNKS`] in-order replies
    pub async fn send(&self, replier: &dyn Replier, text: &str) -> BotResult<()> {
        for chunk in self.chunks(text) {
            replier.text(&chunk).await?;
        }
        Ok(())
    }

    /// Relay captured process output: stderr first when present, then stdout
    pub async fn relay_output(&self, replier: &dyn Replier, output: &ProcessOutput) -> BotResult<()> {
        if !output.stderr.is_empty() {
            self.send(replier, &format!("Error: {}", output.stderr)).await?;
        }
        self.send(replier, &format!("Output: {}", output.stdout)).await
    }
}
