//! Classification of a parsed payload plus its drop target.

use crate::payload::{ColumnSlot, DragPayload, DropTarget};
use blockmail_model::{BlockType, ColumnRatio};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The four edits a drop can mean
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "camelCase")]
pub enum DragIntent {
    /// Palette item dropped on the canvas
    NewBlock { block_type: String, index: usize },

    /// Existing block moved to a canvas position or into a column
    Reorder { block_id: String, to: DropTarget },

    /// Layout preset dropped on the canvas
    LayoutInsert { column_ratio: String, index: usize },

    /// Palette item dropped into a column slot
    ColumnInsert { slot: ColumnSlot, block_type: String },
}

impl DragIntent {
    /// `None` means the drop cancels: no target, or nothing to act on
    pub fn decode(payload: &DragPayload, target: Option<&DropTarget>) -> Option<Self> {
        let Some(target) = target else {
            debug!("Drop without a target");
            return None;
        };

        if payload.is_reorder {
            let Some(block_id) = payload.block_id() else {
                debug!("Reorder payload without a block id");
                return None;
            };
            return Some(DragIntent::Reorder {
                block_id: block_id.to_string(),
                to: target.clone(),
            });
        }

        let Some(block_type) = payload.block_type() else {
            debug!(snippet = payload.is_snippet, "Payload has neither a block type nor an id");
            return None;
        };

        match target {
            DropTarget::Column(slot) => Some(DragIntent::ColumnInsert {
                slot: slot.clone(),
                block_type: block_type.to_string(),
            }),
            DropTarget::Canvas { index } if is_layout(payload, block_type) => {
                Some(DragIntent::LayoutInsert {
                    column_ratio: layout_ratio(payload),
                    index: *index,
                })
            }
            DropTarget::Canvas { index } => Some(DragIntent::NewBlock {
                block_type: block_type.to_string(),
                index: *index,
            }),
        }
    }
}

fn is_layout(payload: &DragPayload, block_type: &str) -> bool {
    block_type == BlockType::Columns.as_str()
        && (payload.layout_data.is_some() || payload.is_layout)
}

/// The ratio named in the layout data, else an even split for its column count.
/// An empty string is left for the factory to default.
fn layout_ratio(payload: &DragPayload) -> String {
    let Some(layout) = &payload.layout_data else {
        return String::new();
    };
    if !layout.column_ratio.is_empty() {
        return layout.column_ratio.clone();
    }
    ColumnRatio::for_count(layout.column_count)
        .map(|r| r.as_str().to_string())
        .unwrap_or_default()
}
