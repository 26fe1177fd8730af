//! # Undo/Redo Stack
//!
//! Mutations never modify a document in place, so history is a stack of
//! document snapshots.
//!
//! ## Design
//!
//! - Recording pushes the document as it was before an edit
//! - Undo swaps the current document for the last snapshot and keeps the
//!   current one for redo
//! - New edits clear the redo stack
//! - Batches group several edits into one undo step
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! let next = mutation.apply(&doc)?;
//! stack.record(&doc, Some("Move block"));
//! doc = next;
//!
//! if let Some(previous) = stack.undo(&doc) {
//!     doc = previous;
//! }
//! ```

use blockmail_model::Document;

/// One undo step: the document as it was before the step
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub document: Document,
    pub description: Option<String>,
}

impl Snapshot {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug)]
pub struct UndoStack {
    /// Most recent last
    undo_stack: Vec<Snapshot>,

    /// Most recent last
    redo_stack: Vec<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Document state when the open batch began
    current_batch: Option<Snapshot>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Record the state before an edit. Inside a batch this is a no-op: the
    /// batch already holds the state from before its first edit.
    pub fn record(&mut self, before: &Document, description: Option<&str>) {
        if self.current_batch.is_some() {
            return;
        }
        let mut snapshot = Snapshot::new(before.clone());
        snapshot.description = description.map(str::to_string);
        self.push(snapshot);
    }

    pub fn begin_batch(&mut self, current: &Document) {
        self.current_batch = Some(Snapshot::new(current.clone()));
    }

    pub fn set_batch_description(&mut self, description: impl Into<String>) {
        if let Some(batch) = &mut self.current_batch {
            batch.description = Some(description.into());
        }
    }

    /// Close the batch; it becomes an undo step only if the document changed
    pub fn end_batch(&mut self, current: &Document) {
        if let Some(batch) = self.current_batch.take() {
            if batch.document != *current {
                self.push(batch);
            }
        }
    }

    fn push(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        self.redo_stack.clear();
    }

    /// Step back; returns the document to restore
    pub fn undo(&mut self, current: &Document) -> Option<Document> {
        let snapshot = self.undo_stack.pop()?;
        self.redo_stack.push(Snapshot {
            document: current.clone(),
            description: snapshot.description.clone(),
        });
        Some(snapshot.document)
    }

    /// Step forward; returns the document to restore
    pub fn redo(&mut self, current: &Document) -> Option<Document> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(Snapshot {
            document: current.clone(),
            description: snapshot.description.clone(),
        });
        Some(snapshot.document)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|snapshot| snapshot.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|snapshot| snapshot.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
