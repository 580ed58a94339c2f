//! Utility functions for formatting and parsing

use crate::constants::TELEGRAM_MESSAGE_LIMIT;

/// Format file size in human-readable format
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let bytes = bytes as f64;
    let unit_index = (bytes.ln() / 1024_f64.ln()).floor() as usize;
    let unit_index = unit_index.min(UNITS.len() - 1);

    let size = bytes / 1024_f64.powi(unit_index as i32);
    format!("{:.2} {}", size, UNITS[unit_index])
}

/// Everything after the command token, trimmed
///
/// `"/rm  My Movie.mkv "` gives `"My Movie.mkv"`; a bare command gives `""`.
pub fn command_argument(text: &str) -> &str {
    let text = text.trim_start();
    match text.find(char::is_whitespace) {
        Some(pos) => text[pos..].trim(),
        None => "",
    }
}

/// True for text that starts with a `/` command token
///
/// Photos, stickers and plain chatter are ignored by the fallback handler.
pub fn looks_like_command(text: Option<&str>) -> bool {
    text.is_some_and(|t| t.trim_start().starts_with('/'))
}

/// First whitespace-separated argument after the command token
pub fn first_argument(text: &str) -> Option<&str> {
    text.split_whitespace().nth(1)
}

/// Escape special characters for MarkdownV2
///
/// Escapes: \_*[]()~`>#+-=|{}.!
pub fn escape_markdown_v2(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '_' | '*' | '[' | ']' | '(' | ')' | '~' | '`' | '>' | '#' | '+' | '-' | '='
                | '|' | '{' | '}' | '.' | '!'
        ) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Cut text to Telegram's message limit, counted in characters
pub fn truncate_message(text: &str) -> &str {
    match text.char_indices().nth(TELEGRAM_MESSAGE_LIMIT) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
