//! # Drag Payload Protocol
//!
//! The canvas hands us whatever string the browser put on the drag event.
//! [`DragPayload::parse`] is the only place that string is interpreted; it
//! never fails. Anything that is not a JSON object is taken to be the id of
//! a block being reordered.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutData {
    pub column_count: usize,
    pub column_ratio: String,
}

/// Untyped drag data as sent by the palette or the canvas
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DragPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_reorder: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_data: Option<LayoutData>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_layout: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_snippet: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl DragPayload {
    pub fn new_block(block_type: impl Into<String>) -> Self {
        Self {
            block_type: Some(block_type.into()),
            ..Self::default()
        }
    }

    pub fn reorder(block_id: impl Into<String>) -> Self {
        Self {
            block_id: Some(block_id.into()),
            is_reorder: true,
            ..Self::default()
        }
    }

    pub fn layout(column_ratio: impl Into<String>, column_count: usize) -> Self {
        Self {
            block_type: Some("columns".to_string()),
            layout_data: Some(LayoutData {
                column_count,
                column_ratio: column_ratio.into(),
            }),
            is_layout: true,
            ..Self::default()
        }
    }

    pub fn parse(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(object)) => Self::from_object(object),
            Ok(Value::String(id)) => Self::reorder(id),
            Ok(other) => {
                debug!(payload = %other, "Drag payload is not an object, using it as a block id");
                Self::reorder(raw.trim())
            }
            Err(_) => Self::reorder(raw.trim()),
        }
    }

    fn from_object(object: Map<String, Value>) -> Self {
        let value = Value::Object(object);
        match Self::deserialize(&value) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "Drag payload has mistyped fields, reading what is usable");
                let Value::Object(object) = value else {
                    return Self::default();
                };
                Self::lenient(&object)
            }
        }
    }

    /// Read each field on its own, dropping the ones with the wrong type
    fn lenient(object: &Map<String, Value>) -> Self {
        let string = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let flag = |key: &str| object.get(key).and_then(Value::as_bool).unwrap_or(false);

        Self {
            block_type: string("blockType"),
            block_id: string("blockId"),
            is_reorder: flag("isReorder"),
            layout_data: object
                .get("layoutData")
                .and_then(|v| LayoutData::deserialize(v).ok()),
            is_layout: flag("isLayout"),
            is_snippet: flag("isSnippet"),
            snippet_id: string("snippetId"),
            source: string("source"),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn block_type(&self) -> Option<&str> {
        self.block_type.as_deref().filter(|s| !s.is_empty())
    }

    pub fn block_id(&self) -> Option<&str> {
        self.block_id.as_deref().filter(|s| !s.is_empty())
    }
}

/// `"<columnsBlockId>-<columnIndex>"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSlot {
    pub block_id: String,
    pub column: usize,
}

impl ColumnSlot {
    pub fn new(block_id: impl Into<String>, column: usize) -> Self {
        Self {
            block_id: block_id.into(),
            column,
        }
    }

    /// Split on the last hyphen; generated block ids contain hyphens themselves
    pub fn parse(zone_id: &str) -> Option<Self> {
        let (block_id, column) = zone_id.rsplit_once('-')?;
        if block_id.is_empty() {
            return None;
        }
        let column = column.parse().ok()?;
        Some(Self::new(block_id, column))
    }

    pub fn zone_id(&self) -> String {
        format!("{}-{}", self.block_id, self.column)
    }
}

impl fmt::Display for ColumnSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.block_id, self.column)
    }
}

pub const CANVAS_ZONE: &str = "canvas";

/// Where a drop landed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum DropTarget {
    /// Top-level position in the document
    Canvas { index: usize },
    Column(ColumnSlot),
}

impl DropTarget {
    pub fn canvas(index: usize) -> Self {
        DropTarget::Canvas { index }
    }

    pub fn column(block_id: impl Into<String>, column: usize) -> Self {
        DropTarget::Column(ColumnSlot::new(block_id, column))
    }

    /// Map a drop-zone id to a target.
    ///
    /// `canvas-<n>` is a canvas position, `canvas` / `canvas-end` append, and
    /// anything else that parses as a column slot is a column.
    pub fn from_zone(zone_id: &str, canvas_len: usize) -> Option<Self> {
        let zone_id = zone_id.trim();
        if zone_id == CANVAS_ZONE {
            return Some(Self::canvas(canvas_len));
        }
        if let Some(rest) = zone_id.strip_prefix("canvas-") {
            if rest == "end" {
                return Some(Self::canvas(canvas_len));
            }
            if let Ok(index) = rest.parse() {
                return Some(Self::canvas(index));
            }
        }
        ColumnSlot::parse(zone_id).map(DropTarget::Column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_new_block_payload() {
        let payload = DragPayload::parse(r#"{"blockType":"button"}"#);
        assert_eq!(payload.block_type(), Some("button"));
        assert!(!payload.is_reorder);
    }

    #[test]
    fn test_non_json_is_bare_reorder() {
        let payload = DragPayload::parse("text-1a2b-7");
        assert_eq!(payload, DragPayload::reorder("text-1a2b-7"));

        let payload = DragPayload::parse("42");
        assert_eq!(payload.block_id(), Some("42"));
        assert!(payload.is_reorder);

        let payload = DragPayload::parse(r#""image-3""#);
        assert_eq!(payload.block_id(), Some("image-3"));
    }

    #[test]
    fn test_mistyped_fields_are_dropped() {
        let payload = DragPayload::parse(r#"{"blockType":"text","isReorder":"yes","blockId":7}"#);
        assert_eq!(payload.block_type(), Some("text"));
        assert!(!payload.is_reorder);
        assert_eq!(payload.block_id(), None);
    }

    #[test]
    fn test_layout_payload() {
        let payload = DragPayload::parse(
            r#"{
                "blockType": "columns",
                "layoutData": { "columnCount": 3, "columnRatio": "33-33-33" },
                "isLayout": true
            }"#,
        );
        let layout = payload.layout_data.unwrap();
        assert_eq!(layout.column_count, 3);
        assert_eq!(layout.column_ratio, "33-33-33");
    }

    #[test]
    fn test_payload_round_trips_through_json() {
        let payload = DragPayload::layout("25-75", 2);
        assert_eq!(DragPayload::parse(&payload.to_json()), payload);
    }

    #[test]
    fn test_column_slot_splits_on_last_hyphen() {
        let slot = ColumnSlot::parse("columns-9f3a-12-1").unwrap();
        assert_eq!(slot.block_id, "columns-9f3a-12");
        assert_eq!(slot.column, 1);
        assert_eq!(slot.zone_id(), "columns-9f3a-12-1");

        assert!(ColumnSlot::parse("col1").is_none());
        assert!(ColumnSlot::parse("-1").is_none());
        assert!(ColumnSlot::parse("col1-x").is_none());
    }

    #[test]
    fn test_zone_ids() {
        assert_eq!(DropTarget::from_zone("canvas-2", 5), Some(DropTarget::canvas(2)));
        assert_eq!(DropTarget::from_zone("canvas", 5), Some(DropTarget::canvas(5)));
        assert_eq!(DropTarget::from_zone("canvas-end", 5), Some(DropTarget::canvas(5)));
        assert_eq!(DropTarget::from_zone("col1-1", 5), Some(DropTarget::column("col1", 1)));
        assert_eq!(DropTarget::from_zone("nowhere", 5), None);
    }
}
