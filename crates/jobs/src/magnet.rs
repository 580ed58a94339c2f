//! Magnet link validation
//!
//! A magnet link ends up on the downloader's command line, so only links of
//! the form `magnet:?xt=urn:btih:<alphanumeric hash>[&params...]` are
//! accepted. The fixed `magnet:` prefix also guarantees the value can never be
//! read as an option flag.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid magnet link")]
pub struct InvalidMagnet;

/// A magnet link that passed validation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MagnetLink(String);

fn pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^magnet:\?xt=urn:btih:([A-Za-z0-9]+)(?:&[^\s`\\]*)?$")
            .unwrap_or_else(|e| unreachable!("magnet pattern is a valid regex: {}", e))
    })
}

impl MagnetLink {
    pub fn parse(text: &str) -> Result<Self, InvalidMagnet> {
        if pattern().is_match(text) {
            Ok(Self(text.to_string()))
        } else {
            Err(InvalidMagnet)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The btih hash, lowercased
    pub fn info_hash(&self) -> String {
        pattern()
            .captures(&self.0)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_lowercase())
            .unwrap_or_default()
    }
}

impl fmt::Display for MagnetLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for MagnetLink {
    type Err = InvalidMagnet;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
