//! Permission gate
//!
//! Every user-facing entry point calls [`authorize`] first and returns early
//! when it reports `false`.

use std::collections::HashSet;
use std::sync::Arc;

use crate::config::ConfigError;
use crate::constants::messages;
use crate::error::BotResult;
use crate::reply::Replier;

/// Fixed set of Telegram user ids allowed to use the bot
#[derive(Debug, Clone)]
pub struct AllowedUsers(Arc<HashSet<u64>>);

impl AllowedUsers {
    pub fn new(ids: impl IntoIterator<Item = u64>) -> Self {
        Self(Arc::new(ids.into_iter().collect()))
    }

    /// Parse a comma-separated id list such as `"123, 456"`
    ///
    /// Blank items are ignored; an empty result is an error.
    pub fn parse(list: &str) -> Result<Self, ConfigError> {
        let mut ids = HashSet::new();
        for item in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let id = item
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidUserId(item.to_string()))?;
            ids.insert(id);
        }

        if ids.is_empty() {
            return Err(ConfigError::NoAllowedUsers);
        }
        Ok(Self(Arc::new(ids)))
    }

    pub fn contains(&self, user_id: u64) -> bool {
        self.0.contains(&user_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Check the sender against the allowlist
///
/// Sends the rejection message and returns `false` for unknown or anonymous
/// senders; has no other effect.
pub async fn authorize(
    allowed: &AllowedUsers,
    user_id: Option<u64>,
    replier: &dyn Replier,
) -> BotResult<bool> {
    match user_id {
        Some(id) if allowed.contains(id) => Ok(true),
        _ => {
            tracing::warn!("Rejected command from user {:?}", user_id);
            replier.text(messages::NOT_ALLOWED).await?;
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingReplier, Sent};

    #[test]
    fn test_parse_list() {
        let allowed = AllowedUsers::parse("123, 456,789").unwrap();
        assert_eq!(allowed.len(), 3);
        assert!(allowed.contains(456));
        assert!(!allowed.contains(1));
    }

    #[test]
    fn test_parse_ignores_blank_items() {
        let allowed = AllowedUsers::parse(",123,,").unwrap();
        assert_eq!(allowed.len(), 1);
    }

    #[test]
    fn test_parse_rejects_empty_and_garbage() {
        assert!(matches!(AllowedUsers::parse(""), Err(ConfigError::NoAllowedUsers)));
        assert!(matches!(AllowedUsers::parse(" , "), Err(ConfigError::NoAllowedUsers)));
        assert!(matches!(
            AllowedUsers::parse("123,abc"),
            Err(ConfigError::InvalidUserId(ref s)) if s == "abc"
        ));
        assert!(matches!(
            AllowedUsers::parse("-5"),
            Err(ConfigError::InvalidUserId(_))
        ));
    }

    #[tokio::test]
    async fn test_authorize_allowed_user_is_silent() {
        let replier = RecordingReplier::default();
        let allowed = AllowedUsers::new([42]);
        assert!(authorize(&allowed, Some(42), &replier).await.unwrap());
        assert!(replier.sent().is_empty());
    }

    #[tokio::test]
    async fn test_authorize_rejects_unknown_and_anonymous() {
        let allowed = AllowedUsers::new([42]);
        for user in [Some(7), None] {
            let replier = RecordingReplier::default();
            assert!(!authorize(&allowed, user, &replier).await.unwrap());
            assert_eq!(replier.sent(), vec![Sent::Text(messages::NOT_ALLOWED.to_string())]);
        }
    }
}
