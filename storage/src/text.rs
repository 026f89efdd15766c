//! Display text resolution.

use crate::payload::{Attachment, MessagePayload};

/// Best-effort display text: the first non-empty of conversation text, extended text,
/// image/video/document caption and contact name; empty when none is present.
pub fn resolve_text(payload: &MessagePayload) -> String {
    [
        payload.conversation.as_deref(),
        payload
            .extended_text_message
            .as_ref()
            .and_then(|m| m.text.as_deref()),
        caption(&payload.image_message),
        caption(&payload.video_message),
        caption(&payload.document_message),
        payload
            .contact_message
            .as_ref()
            .and_then(|c| c.display_name.as_deref()),
    ]
    .into_iter()
    .flatten()
    .find(|s| !s.is_empty())
    .unwrap_or_default()
    .to_string()
}

fn caption(node: &Option<Attachment>) -> Option<&str> {
    node.as_ref().and_then(|a| a.caption.as_deref())
}
