//! # Blockmail Editor
//!
//! Drag-and-drop editing engine for the block document.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ canvas: drag events, drop-zone ids          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor                                      │
//! │  - DragPayload::parse → DragIntent::decode  │
//! │  - engine: intent → Mutation → new Document │
//! │  - DragMachine, UndoStack, EditSession      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ compiler-html: Document → preview HTML      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **The document is the source of truth**: markup is always derived
//! 2. **Pure edits**: every mutation returns a new document
//! 3. **Drops never fail**: a rejected drop is logged and changes nothing
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blockmail_editor::{apply_drag_payload, DragPayload, DropTarget};
//!
//! let payload = DragPayload::parse(r#"{"blockType":"button"}"#);
//! let target = DropTarget::from_zone("col1-1", doc.len());
//! let doc = apply_drag_payload(&doc, &payload, target.as_ref());
//! ```

pub mod drag;
pub mod engine;
mod errors;
pub mod intent;
mod mutations;
pub mod payload;
mod pipeline;
mod session;
mod undo_stack;

pub use drag::{CancelReason, DragEffect, DragKind, DragMachine, DragNoopReason, DragState};
pub use engine::{
    apply_drag_payload, apply_drag_payload_with, apply_intent_with, plan, try_apply_intent,
};
pub use errors::EditorError;
pub use intent::DragIntent;
pub use mutations::{Destination, Mutation, MutationError};
pub use payload::{ColumnSlot, DragPayload, DropTarget, LayoutData};
pub use pipeline::{Pipeline, PipelineResult};
pub use session::EditSession;
pub use undo_stack::{Snapshot, UndoStack};

pub use blockmail_model::Document;
