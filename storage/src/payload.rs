//! Typed view over the nested JSON message payload.
//!
//! Every field is optional and decoded leniently: a field of an unexpected JSON type reads as
//! absent instead of failing the whole payload, so one odd message cannot break a page.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::media::MediaKind;

/// The content variants a message may carry, keyed as in the stored JSON.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MessagePayload {
    #[serde(deserialize_with = "lenient_string")]
    pub conversation: Option<String>,
    #[serde(deserialize_with = "lenient_object")]
    pub extended_text_message: Option<ExtendedText>,
    #[serde(deserialize_with = "lenient_object")]
    pub image_message: Option<Attachment>,
    #[serde(deserialize_with = "lenient_object")]
    pub video_message: Option<Attachment>,
    #[serde(deserialize_with = "lenient_object")]
    pub document_message: Option<Attachment>,
    #[serde(deserialize_with = "lenient_object")]
    pub audio_message: Option<Attachment>,
    #[serde(deserialize_with = "lenient_object")]
    pub sticker_message: Option<Attachment>,
    #[serde(deserialize_with = "lenient_object")]
    pub contact_message: Option<ContactCard>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtendedText {
    #[serde(deserialize_with = "lenient_string")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactCard {
    #[serde(deserialize_with = "lenient_string")]
    pub display_name: Option<String>,
}

/// Metadata shared by every attachment variant. Which fields are filled depends on the kind.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Attachment {
    #[serde(deserialize_with = "lenient_string")]
    pub caption: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub text: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub mimetype: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub file_name: Option<String>,
    /// Bytes.
    #[serde(deserialize_with = "lenient_unsigned")]
    pub file_length: Option<u64>,
    /// Duration, audio only.
    #[serde(deserialize_with = "lenient_unsigned")]
    pub seconds: Option<u64>,
    #[serde(deserialize_with = "lenient_string")]
    pub direct_path: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub url: Option<String>,
    /// Base64 text; byte arrays are encoded on read.
    #[serde(deserialize_with = "lenient_bytes")]
    pub jpeg_thumbnail: Option<String>,
}

impl MessagePayload {
    /// Decodes a stored JSON column. Missing, non-object or unparsable input yields an
    /// empty payload.
    pub fn from_json(raw: Option<&str>) -> Self {
        raw.and_then(|text| serde_json::from_str(text).ok())
            .unwrap_or_default()
    }

    pub fn attachment(&self, kind: MediaKind) -> Option<&Attachment> {
        match kind {
            MediaKind::Image => self.image_message.as_ref(),
            MediaKind::Video => self.video_message.as_ref(),
            MediaKind::Document => self.document_message.as_ref(),
            MediaKind::Audio => self.audio_message.as_ref(),
            MediaKind::Sticker => self.sticker_message.as_ref(),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}

fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => serde_json::from_value(value).ok(),
        _ => None,
    })
}

/// Numbers, numeric strings and protobuf `{low, high}` longs; zero reads as absent.
fn lenient_unsigned<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_unsigned(&value).filter(|n| *n > 0))
}

fn as_unsigned(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        Value::Object(map) => {
            let low = map.get("low").and_then(Value::as_i64)?;
            let high = map.get("high").and_then(Value::as_i64).unwrap_or(0);
            let low = u64::from(low as u32);
            let high = u64::from(high as u32);
            Some((high << 32) | low)
        }
        _ => None,
    }
}

/// Base64 strings pass through; byte arrays (`[1,2]` or `{"type":"Buffer","data":[…]}`) are encoded.
fn lenient_bytes<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let bytes = match &value {
        Value::String(s) if !s.is_empty() => return Ok(Some(s.clone())),
        Value::Array(items) => items,
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(items)) => items,
            _ => return Ok(None),
        },
        _ => return Ok(None),
    };
    let decoded: Option<Vec<u8>> = bytes
        .iter()
        .map(|b| b.as_u64().and_then(|b| u8::try_from(b).ok()))
        .collect();
    Ok(decoded
        .filter(|b| !b.is_empty())
        .map(|b| STANDARD.encode(b)))
}
