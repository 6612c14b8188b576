use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{DaftarError, Result};

const FUNNY_MARKERS: &[&str] = &["\u{1f602}", ":)", "haha"];
const LOVE_MARKERS: &[&str] = &["\u{2764}", "love", "pyaar"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Funny,
    Love,
    Neutral,
}

impl Sentiment {
    /// Case-insensitive marker search; funny markers take priority over love.
    pub fn classify(text: &str) -> Self {
        let lower = text.to_lowercase();
        if FUNNY_MARKERS.iter().any(|m| lower.contains(m)) {
            Sentiment::Funny
        } else if LOVE_MARKERS.iter().any(|m| lower.contains(m)) {
            Sentiment::Love
        } else {
            Sentiment::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Funny => "funny",
            Sentiment::Love => "love",
            Sentiment::Neutral => "neutral",
        }
    }
}

/// One exported chat line: `DD/MM/YYYY, HH:MM - Sender: text`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedMessage {
    pub date: String,
    pub time: String,
    pub sender: String,
    pub text: String,
    pub word_count: usize,
    pub sentiment: Sentiment,
}

impl ParsedMessage {
    pub fn from_line(line: &str) -> Result<Self> {
        if !line.contains('-') {
            return Err(DaftarError::MissingDelimiter('-'));
        }
        if !line.contains(':') {
            return Err(DaftarError::MissingDelimiter(':'));
        }

        let (date, rest) = line
            .split_once(',')
            .ok_or(DaftarError::MissingDelimiter(','))?;
        let (time, sender_and_text) = rest
            .split_once('-')
            .ok_or(DaftarError::MissingDelimiter('-'))?;
        let (sender, text) = sender_and_text
            .trim()
            .split_once(':')
            .ok_or(DaftarError::MissingDelimiter(':'))?;

        let text = text.trim().to_string();
        Ok(ParsedMessage {
            date: date.trim().to_string(),
            time: time.trim().to_string(),
            sender: sender.trim().to_string(),
            word_count: text.split(' ').filter(|w| !w.is_empty()).count(),
            sentiment: Sentiment::classify(&text),
            text,
        })
    }

    /// Date and time as a calendar timestamp, when both are well-formed.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(&self.date, "%d/%m/%Y").ok()?;
        let time = NaiveTime::parse_from_str(&self.time, "%H:%M").ok()?;
        Some(date.and_time(time))
    }
}

/// Parse a chat line, returning `None` when it does not have the expected shape.
pub fn parse_message(line: &str) -> Option<ParsedMessage> {
    ParsedMessage::from_line(line)
        .map_err(|e| debug!(error = %e, "rejected chat line"))
        .ok()
}

/// Like [`parse_message`] for a decoded JSON value; non-strings are rejected.
pub fn parse_message_value(value: &Value) -> Option<ParsedMessage> {
    match value.as_str() {
        Some(line) => parse_message(line),
        None => {
            debug!(error = %DaftarError::WrongType("a string"), "rejected chat line");
            None
        }
    }
}
