//! Typed filter requests consumed by the filter compiler and the query engine.

use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Largest page the message listing will return.
pub const MAX_MESSAGE_PAGE: i64 = 500;
/// Largest page the chat listing will return.
pub const MAX_CHAT_PAGE: i64 = 200;
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Who sent a message, relative to the instance's own account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    pub fn from_me(from_me: bool) -> Self {
        if from_me {
            Self::Out
        } else {
            Self::In
        }
    }

    /// Value compared against the `fromMe` flag of the message key.
    pub fn is_from_me(self) -> bool {
        matches!(self, Self::Out)
    }

    /// Parses `in`/`out`; empty and `any` mean "no direction filter".
    pub fn parse_filter(raw: &str) -> Result<Option<Self>, StorageError> {
        match raw.trim() {
            "" | "any" => Ok(None),
            "in" => Ok(Some(Self::In)),
            "out" => Ok(Some(Self::Out)),
            other => Err(StorageError::validation(format!(
                "direction must be one of in, out, any; got {:?}",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

/// Page size and zero-based page index, already clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub index: i64,
}

impl Page {
    /// Clamps `limit` into `1..=max` and `index` to be non-negative.
    pub fn clamped(limit: i64, index: i64, max: i64) -> Self {
        Self {
            limit: limit.clamp(1, max),
            index: index.max(0),
        }
    }

    pub fn offset(&self) -> i64 {
        self.limit.saturating_mul(self.index)
    }
}

/// Filters for one message listing. Absent criteria do not constrain the result.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageFilter {
    pub instance_id: String,
    pub remote_jid: String,
    /// Case-insensitive substring over every text-bearing payload field.
    pub text: Option<String>,
    pub direction: Option<Direction>,
    /// Inclusive lower bound, seconds since epoch.
    pub start: Option<i64>,
    /// Inclusive upper bound, seconds since epoch.
    pub end: Option<i64>,
    pub page: Page,
}

impl MessageFilter {
    pub fn new(instance_id: impl Into<String>, remote_jid: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            remote_jid: remote_jid.into(),
            text: None,
            direction: None,
            start: None,
            end: None,
            page: Page::clamped(DEFAULT_PAGE_SIZE, 0, MAX_MESSAGE_PAGE),
        }
    }

    pub fn validate(&self) -> Result<(), StorageError> {
        if self.instance_id.trim().is_empty() || self.remote_jid.trim().is_empty() {
            return Err(StorageError::validation(
                "instanceId and remoteJid are required",
            ));
        }
        Ok(())
    }
}

/// Filters for one chat listing within an instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatFilter {
    pub instance_id: String,
    /// Case-insensitive substring over the remote JID or the chat name.
    pub query: Option<String>,
    pub page: Page,
}

impl ChatFilter {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            query: None,
            page: Page::clamped(DEFAULT_PAGE_SIZE, 0, MAX_CHAT_PAGE),
        }
    }

    pub fn validate(&self) -> Result<(), StorageError> {
        if self.instance_id.trim().is_empty() {
            return Err(StorageError::validation("instanceId is required"));
        }
        Ok(())
    }
}
