//! Decoding of single-issue XML exports
//!
//! Each export is an RSS feed with exactly one `<item>` under `<channel>`.
//! Only four fields of the item are used; everything else is ignored.

use crate::error::{Error, Result};
use serde::Deserialize;

/// One decoded issue, consumed by the aggregator and then dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub status: String,
    pub created: String,
    /// Absent for issues that were never resolved
    pub resolved: Option<String>,
    pub issue_type: String,
}

#[derive(Debug, Deserialize)]
struct Feed {
    channel: Channel,
}

#[derive(Debug, Deserialize)]
struct Channel {
    item: Item,
}

#[derive(Debug, Deserialize)]
struct Item {
    status: TextElement,
    created: TextElement,
    resolved: Option<TextElement>,
    #[serde(rename = "type")]
    issue_type: TextElement,
}

/// Element whose text content matters but whose attributes (`id`, `iconUrl`) don't
#[derive(Debug, Deserialize)]
struct TextElement {
    #[serde(rename = "$text", default)]
    value: String,
}

impl TextElement {
    fn into_required(self, field: &str) -> Result<String> {
        let value = self.value.trim();
        if value.is_empty() {
            return Err(Error::decode(format!("empty <{field}> element")));
        }
        Ok(value.to_string())
    }

    fn into_optional(self) -> Option<String> {
        let value = self.value.trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

/// Decode raw file content into a [`Record`]
pub fn decode(bytes: &[u8]) -> Result<Record> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::decode(format!("content is not valid UTF-8: {e}")))?;

    let feed: Feed = quick_xml::de::from_str(text).map_err(|e| Error::decode(e.to_string()))?;
    let item = feed.channel.item;

    Ok(Record {
        status: item.status.into_required("status")?,
        created: item.created.into_required("created")?,
        resolved: item.resolved.and_then(TextElement::into_optional),
        issue_type: item.issue_type.into_required("type")?,
    })
}
