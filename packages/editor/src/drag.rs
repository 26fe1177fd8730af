//! # Drag Session State Machine
//!
//! ```text
//! Idle -> Dragging -> HoveringZone -> Dropped   -> Idle
//!             ^            |       \-> Cancelled -> Idle
//!             \---- leave -/
//! ```
//!
//! Events that do not apply to the current state are not errors; they yield
//! [`DragEffect::Noop`] with the reason.

use crate::payload::{DragPayload, DropTarget};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DragKind {
    NewBlock,
    Reorder,
    Layout,
    Snippet,
}

impl DragKind {
    pub fn of(payload: &DragPayload) -> Self {
        if payload.is_reorder {
            DragKind::Reorder
        } else if payload.is_layout || payload.layout_data.is_some() {
            DragKind::Layout
        } else if payload.is_snippet {
            DragKind::Snippet
        } else {
            DragKind::NewBlock
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        payload: DragPayload,
        kind: DragKind,
    },
    HoveringZone {
        payload: DragPayload,
        kind: DragKind,
        zone_id: String,
        target: Option<DropTarget>,
    },
    Dropped {
        payload: DragPayload,
        target: Option<DropTarget>,
    },
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DragNoopReason {
    NotDragging,
    AlreadyDragging,
    NotHovering,
    SameZone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CancelReason {
    /// Escape key or the drag left the window
    User,
    /// Released outside every drop zone
    NoDropZone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "camelCase")]
pub enum DragEffect {
    Started {
        kind: DragKind,
    },
    Hovered {
        zone_id: String,
    },
    Left {
        zone_id: String,
    },
    Dropped {
        payload: DragPayload,
        target: Option<DropTarget>,
    },
    Cancelled {
        reason: CancelReason,
    },
    Noop {
        reason: DragNoopReason,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DragMachine {
    state: DragState,
}

impl DragMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Dragging or hovering a zone
    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. } | DragState::HoveringZone { .. })
    }

    pub fn hovered_zone(&self) -> Option<&str> {
        match &self.state {
            DragState::HoveringZone { zone_id, .. } => Some(zone_id),
            _ => None,
        }
    }

    pub fn begin(&mut self, payload: DragPayload) -> DragEffect {
        if self.is_active() {
            return noop(DragNoopReason::AlreadyDragging);
        }
        let kind = DragKind::of(&payload);
        debug!(?kind, "Drag started");
        self.state = DragState::Dragging { payload, kind };
        DragEffect::Started { kind }
    }

    /// Pointer entered a drop zone; `target` is `None` when the zone id does not resolve
    pub fn hover(&mut self, zone_id: &str, target: Option<DropTarget>) -> DragEffect {
        let (payload, kind) = match std::mem::take(&mut self.state) {
            DragState::Dragging { payload, kind } => (payload, kind),
            DragState::HoveringZone {
                payload,
                kind,
                zone_id: current,
                target: current_target,
            } => {
                if current == zone_id {
                    self.state = DragState::HoveringZone {
                        payload,
                        kind,
                        zone_id: current,
                        target: current_target,
                    };
                    return noop(DragNoopReason::SameZone);
                }
                (payload, kind)
            }
            other => {
                self.state = other;
                return noop(DragNoopReason::NotDragging);
            }
        };

        self.state = DragState::HoveringZone {
            payload,
            kind,
            zone_id: zone_id.to_string(),
            target,
        };
        DragEffect::Hovered {
            zone_id: zone_id.to_string(),
        }
    }

    pub fn leave(&mut self) -> DragEffect {
        match std::mem::take(&mut self.state) {
            DragState::HoveringZone {
                payload,
                kind,
                zone_id,
                ..
            } => {
                self.state = DragState::Dragging { payload, kind };
                DragEffect::Left { zone_id }
            }
            other => {
                let reason = if matches!(other, DragState::Dragging { .. }) {
                    DragNoopReason::NotHovering
                } else {
                    DragNoopReason::NotDragging
                };
                self.state = other;
                noop(reason)
            }
        }
    }

    /// Release over the hovered zone; releasing outside any zone cancels
    pub fn drop(&mut self) -> DragEffect {
        match std::mem::take(&mut self.state) {
            DragState::HoveringZone {
                payload, target, ..
            } => {
                self.state = DragState::Dropped {
                    payload: payload.clone(),
                    target: target.clone(),
                };
                DragEffect::Dropped { payload, target }
            }
            DragState::Dragging { .. } => {
                self.state = DragState::Cancelled;
                DragEffect::Cancelled {
                    reason: CancelReason::NoDropZone,
                }
            }
            other => {
                self.state = other;
                noop(DragNoopReason::NotDragging)
            }
        }
    }

    pub fn cancel(&mut self) -> DragEffect {
        if !self.is_active() {
            return noop(DragNoopReason::NotDragging);
        }
        self.state = DragState::Cancelled;
        DragEffect::Cancelled {
            reason: CancelReason::User,
        }
    }

    /// Return to idle once a drop or cancel has been handled
    pub fn settle(&mut self) {
        if !self.is_active() {
            self.state = DragState::Idle;
        }
    }
}

fn noop(reason: DragNoopReason) -> DragEffect {
    debug!(?reason, "Drag event ignored");
    DragEffect::Noop { reason }
}
