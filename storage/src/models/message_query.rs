//! Raw query parameters for listing chats and messages, as sent by the UI.
//!
//! Everything arrives as optional strings; [`MessageQuery::to_filter`] and
//! [`ChatQuery::to_filter`] validate and convert them into typed filters.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::models::message_filter::{
    ChatFilter, Direction, MessageFilter, Page, DEFAULT_PAGE_SIZE, MAX_CHAT_PAGE,
    MAX_MESSAGE_PAGE,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageQuery {
    pub instance_id: Option<String>,
    pub remote_jid: Option<String>,
    pub text: Option<String>,
    /// `""` | `any` | `in` | `out`
    pub direction: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl MessageQuery {
    pub fn to_filter(&self) -> Result<MessageFilter, StorageError> {
        self.to_filter_with_default_limit(DEFAULT_PAGE_SIZE)
    }

    /// Like [`to_filter`](Self::to_filter), with a different limit when none is given.
    /// The result is still clamped to [`MAX_MESSAGE_PAGE`].
    pub fn to_filter_with_default_limit(
        &self,
        default_limit: i64,
    ) -> Result<MessageFilter, StorageError> {
        let mut filter = MessageFilter::new(trimmed(&self.instance_id), trimmed(&self.remote_jid));
        filter.validate()?;

        filter.text = non_empty(&self.text);
        filter.direction = Direction::parse_filter(self.direction.as_deref().unwrap_or(""))?;
        filter.start = non_empty(&self.start).map(|s| parse_bound(&s)).transpose()?;
        filter.end = non_empty(&self.end).map(|s| parse_bound(&s)).transpose()?;
        filter.page = Page::clamped(
            parse_int("limit", &self.limit, default_limit)?,
            parse_int("page", &self.page, 0)?,
            MAX_MESSAGE_PAGE,
        );
        Ok(filter)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatQuery {
    pub instance_id: Option<String>,
    /// Substring over remote JID or chat name.
    pub q: Option<String>,
    pub limit: Option<String>,
    pub page: Option<String>,
}

impl ChatQuery {
    pub fn to_filter(&self) -> Result<ChatFilter, StorageError> {
        let mut filter = ChatFilter::new(trimmed(&self.instance_id));
        filter.validate()?;

        filter.query = non_empty(&self.q);
        filter.page = Page::clamped(
            parse_int("limit", &self.limit, DEFAULT_PAGE_SIZE)?,
            parse_int("page", &self.page, 0)?,
            MAX_CHAT_PAGE,
        );
        Ok(filter)
    }
}

/// Parses a date bound into seconds since epoch (UTC).
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM[:SS]`, `YYYY-MM-DD HH:MM[:SS]` and `YYYY-MM-DD`
/// (midnight). Values without an offset are read as UTC.
pub fn parse_bound(raw: &str) -> Result<i64, StorageError> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.timestamp());
    }
    for format in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc().timestamp());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc().timestamp());
        }
    }
    Err(StorageError::validation(format!("invalid date: {:?}", raw)))
}

/// Formats seconds since epoch as `YYYY-MM-DD HH:MM:SS` (UTC).
pub fn format_timestamp(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default()
}

fn trimmed(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").trim().to_string()
}

fn non_empty(value: &Option<String>) -> Option<String> {
    Some(trimmed(value)).filter(|s| !s.is_empty())
}

fn parse_int(name: &str, value: &Option<String>, default: i64) -> Result<i64, StorageError> {
    match non_empty(value) {
        None => Ok(default),
        Some(s) => s
            .parse()
            .map_err(|_| StorageError::validation(format!("{} must be an integer, got {:?}", name, s))),
    }
}
