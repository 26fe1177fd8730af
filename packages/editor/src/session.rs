//! # Edit Session
//!
//! Owns the document being edited and threads it through the canvas event
//! handlers: drag lifecycle, click-to-add, direct mutations, undo and redo.
//! Every accepted change bumps the version.

use crate::drag::{DragEffect, DragMachine};
use crate::engine::apply_drag_payload;
use crate::payload::{DragPayload, DropTarget};
use crate::undo_stack::UndoStack;
use crate::{EditorError, Mutation};
use blockmail_model::{create_block, Document};
use tracing::{debug, warn};

pub struct EditSession {
    /// Unique session identifier
    pub id: String,

    document: Document,

    drag: DragMachine,

    history: UndoStack,

    /// Selected block ids
    pub selected_blocks: Vec<String>,

    version: u64,
}

impl EditSession {
    pub fn new(id: impl Into<String>, document: Document) -> Self {
        Self {
            id: id.into(),
            document,
            drag: DragMachine::new(),
            history: UndoStack::new(),
            selected_blocks: Vec::new(),
            version: 0,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn drag(&self) -> &DragMachine {
        &self.drag
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    pub fn begin_drag(&mut self, payload: DragPayload) -> DragEffect {
        self.drag.begin(payload)
    }

    pub fn hover(&mut self, zone_id: &str) -> DragEffect {
        let target = DropTarget::from_zone(zone_id, self.document.len());
        if target.is_none() {
            warn!(zone_id, "Drop zone id does not resolve to a target");
        }
        self.drag.hover(zone_id, target)
    }

    pub fn leave(&mut self) -> DragEffect {
        self.drag.leave()
    }

    /// Release the drag; a drop that changes nothing leaves history untouched
    pub fn drop(&mut self) -> DragEffect {
        let effect = self.drag.drop();
        if let DragEffect::Dropped { payload, target } = &effect {
            let next = apply_drag_payload(&self.document, payload, target.as_ref());
            self.commit(next, "Drop");
        }
        self.drag.settle();
        effect
    }

    pub fn cancel_drag(&mut self) -> DragEffect {
        let effect = self.drag.cancel();
        self.drag.settle();
        effect
    }

    /// Click-to-add: append a new block at the end of the canvas
    pub fn add_block(&mut self, block_type: &str) -> Result<String, EditorError> {
        let block = create_block(block_type, None)?;
        let id = block.id.clone();
        self.apply(Mutation::InsertBlock {
            index: self.document.len(),
            block,
        })?;
        Ok(id)
    }

    /// Apply a mutation and record it for undo; returns the new version
    pub fn apply(&mut self, mutation: Mutation) -> Result<u64, EditorError> {
        let next = mutation.apply(&self.document)?;
        self.commit(next, mutation.name());
        Ok(self.version)
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo(&self.document) {
            Some(previous) => {
                self.replace(previous);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo(&self.document) {
            Some(next) => {
                self.replace(next);
                true
            }
            None => false,
        }
    }

    pub fn set_selection(&mut self, block_ids: Vec<String>) {
        self.selected_blocks = block_ids;
    }

    fn commit(&mut self, next: Document, description: &str) -> bool {
        if next == self.document {
            debug!(description, "Edit produced no change");
            return false;
        }
        self.history.record(&self.document, Some(description));
        self.replace(next);
        true
    }

    fn replace(&mut self, document: Document) {
        self.document = document;
        self.version += 1;
        let document = &self.document;
        self.selected_blocks.retain(|id| document.contains_id(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_creation() {
        let session = EditSession::new("client-1", Document::new());

        assert_eq!(session.id, "client-1");
        assert_eq!(session.version(), 0);
        assert!(session.selected_blocks.is_empty());
    }

    #[test]
    fn test_add_block_appends_and_versions() {
        let mut session = EditSession::new("client-1", Document::new());
        let first = session.add_block("text").unwrap();
        let second = session.add_block("button").unwrap();

        assert_eq!(session.document().block_ids(), vec![first, second]);
        assert_eq!(session.version(), 2);
        assert!(session.add_block("bogus-type").is_err());
        assert_eq!(session.version(), 2);
    }

    #[test]
    fn test_selection_follows_removal() {
        let mut session = EditSession::new("client-1", Document::new());
        let id = session.add_block("text").unwrap();
        session.set_selection(vec![id.clone()]);

        session.apply(Mutation::RemoveBlock { block_id: id }).unwrap();
        assert!(session.selected_blocks.is_empty());
    }
}
