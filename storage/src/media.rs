//! Media classification: reduces the attachment variant of a payload to one descriptor.

use serde::Serialize;

use crate::payload::{Attachment, MessagePayload};

/// Attachment variants, in classification priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Document,
    Audio,
    Sticker,
}

impl MediaKind {
    pub const ALL: [MediaKind; 5] = [
        MediaKind::Image,
        MediaKind::Video,
        MediaKind::Document,
        MediaKind::Audio,
        MediaKind::Sticker,
    ];

    /// Key of this variant's sub-object in the stored payload.
    pub fn payload_key(self) -> &'static str {
        match self {
            MediaKind::Image => "imageMessage",
            MediaKind::Video => "videoMessage",
            MediaKind::Document => "documentMessage",
            MediaKind::Audio => "audioMessage",
            MediaKind::Sticker => "stickerMessage",
        }
    }
}

/// Normalized attachment metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDescriptor {
    pub kind: MediaKind,
    pub caption: String,
    pub mimetype: String,
    pub file_name: String,
    /// Byte length for files, duration in seconds for audio. The unit is not tagged.
    pub file_length: Option<u64>,
    pub direct_path: Option<String>,
    pub jpeg_thumbnail: Option<String>,
}

impl MediaDescriptor {
    fn describe(kind: MediaKind, node: &Attachment) -> Self {
        Self {
            kind,
            caption: first_of(&node.caption, &node.text),
            mimetype: node.mimetype.clone().unwrap_or_default(),
            file_name: node.file_name.clone().unwrap_or_default(),
            file_length: node.file_length.or(node.seconds),
            direct_path: node.direct_path.clone().or_else(|| node.url.clone()),
            jpeg_thumbnail: node.jpeg_thumbnail.clone(),
        }
    }
}

/// Returns the descriptor of the first attachment variant present, or `None`.
pub fn classify_media(payload: &MessagePayload) -> Option<MediaDescriptor> {
    MediaKind::ALL.into_iter().find_map(|kind| {
        payload
            .attachment(kind)
            .map(|node| MediaDescriptor::describe(kind, node))
    })
}

fn first_of(primary: &Option<String>, fallback: &Option<String>) -> String {
    primary
        .as_ref()
        .or(fallback.as_ref())
        .cloned()
        .unwrap_or_default()
}
