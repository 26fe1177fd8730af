//! # Tree Mutation Engine
//!
//! Turns a decoded drag intent into a [`Mutation`] and applies it. The public
//! entry points never fail: a rejected drop is logged and the caller gets an
//! equal copy of the document back.

use crate::errors::EditorError;
use crate::intent::DragIntent;
use crate::mutations::{Destination, Mutation};
use crate::payload::{DragPayload, DropTarget};
use blockmail_model::{
    create_block_with, create_columns_block_with, create_leaf_block_with, Document, IdSource,
    ProcessIds,
};
use tracing::{debug, warn};

/// Apply a drop to `doc`, returning the new document
pub fn apply_drag_payload(
    doc: &Document,
    payload: &DragPayload,
    target: Option<&DropTarget>,
) -> Document {
    apply_drag_payload_with(&mut ProcessIds, doc, payload, target)
}

pub fn apply_drag_payload_with(
    ids: &mut impl IdSource,
    doc: &Document,
    payload: &DragPayload,
    target: Option<&DropTarget>,
) -> Document {
    match DragIntent::decode(payload, target) {
        Some(intent) => apply_intent_with(ids, doc, &intent),
        None => {
            debug!("Drop cancelled, document unchanged");
            doc.clone()
        }
    }
}

pub fn apply_intent_with(ids: &mut impl IdSource, doc: &Document, intent: &DragIntent) -> Document {
    match try_apply_intent(ids, doc, intent) {
        Ok(next) => next,
        Err(e) => {
            warn!(?intent, error = %e, "Drop rejected, document unchanged");
            doc.clone()
        }
    }
}

/// Like [`apply_intent_with`] but reports why a drop was rejected
pub fn try_apply_intent(
    ids: &mut impl IdSource,
    doc: &Document,
    intent: &DragIntent,
) -> Result<Document, EditorError> {
    let mutation = plan(ids, intent)?;
    debug!(mutation = mutation.name(), "Applying drop");
    Ok(mutation.apply(doc)?)
}

/// Build the mutation an intent stands for, constructing new blocks as needed
pub fn plan(ids: &mut impl IdSource, intent: &DragIntent) -> Result<Mutation, EditorError> {
    Ok(match intent {
        DragIntent::NewBlock { block_type, index } => Mutation::InsertBlock {
            index: *index,
            block: create_block_with(ids, block_type, None)?,
        },

        DragIntent::LayoutInsert { column_ratio, index } => Mutation::InsertBlock {
            index: *index,
            block: create_columns_block_with(ids, column_ratio, None),
        },

        DragIntent::ColumnInsert { slot, block_type } => Mutation::InsertIntoColumn {
            parent_id: slot.block_id.clone(),
            column: slot.column,
            index: None,
            block: create_leaf_block_with(ids, block_type, None)?,
        },

        DragIntent::Reorder { block_id, to } => Mutation::MoveBlock {
            block_id: block_id.clone(),
            to: match to {
                DropTarget::Canvas { index } => Destination::Canvas { index: *index },
                DropTarget::Column(slot) => Destination::Column {
                    parent_id: slot.block_id.clone(),
                    column: slot.column,
                    index: None,
                },
            },
        },
    })
}
