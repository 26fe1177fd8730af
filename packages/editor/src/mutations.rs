//! # Document Mutations
//!
//! Structural edits on the block tree. Every mutation validates against the
//! current document and then produces a new one; the input is never touched.
//!
//! ## Semantics
//!
//! ### MoveBlock
//! - Removes the block from wherever it lives and inserts it at the destination
//! - Moving to its current top-level index returns an equal document
//! - A columns block can only move between canvas positions
//!
//! ### UpdateContent
//! - JSON merge patch over the content object; `null` removes a field
//! - A patch that no longer fits the block's content shape is rejected

use blockmail_model::{
    duplicate_block, duplicate_leaf_block_with, Block, BlockBody, BlockContent, BlockLocation,
    Breakpoint, Column, DisplayOptions, Document, LeafBlock, LeafContent, ProcessIds, Styling,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Where a moved block ends up
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Destination {
    Canvas {
        index: usize,
    },
    /// `index: None` appends to the column
    Column {
        parent_id: String,
        column: usize,
        #[serde(default)]
        index: Option<usize>,
    },
}

/// Semantic edits on a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Insert a top-level block; the index is clamped to the document length
    InsertBlock { index: usize, block: Block },

    /// Insert a leaf block into a column; `index: None` appends
    InsertIntoColumn {
        parent_id: String,
        column: usize,
        index: Option<usize>,
        block: LeafBlock,
    },

    MoveBlock { block_id: String, to: Destination },

    RemoveBlock { block_id: String },

    /// Insert a copy with fresh ids right after the source
    DuplicateBlock { block_id: String },

    /// `breakpoint: None` writes all three maps
    SetStyle {
        block_id: String,
        breakpoint: Option<Breakpoint>,
        property: String,
        value: String,
    },

    RemoveStyle {
        block_id: String,
        breakpoint: Option<Breakpoint>,
        property: String,
    },

    UpdateContent { block_id: String, patch: Value },

    SetDisplayOptions {
        block_id: String,
        options: DisplayOptions,
    },

    SetStarred { block_id: String, starred: bool },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Block not found: {0}")]
    BlockNotFound(String),

    #[error("Block is not a columns layout: {0}")]
    NotAColumnsBlock(String),

    #[error("Column {column} out of range for {block_id} ({count} columns)")]
    ColumnOutOfRange {
        block_id: String,
        column: usize,
        count: usize,
    },

    #[error("Columns blocks cannot be placed inside a column")]
    NestedColumns,

    #[error("Block id already in document: {0}")]
    DuplicateId(String),

    #[error("Invalid content: {0}")]
    InvalidContent(String),
}

impl MutationError {
    fn not_found(id: &str) -> Self {
        Self::BlockNotFound(id.to_string())
    }
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::InsertBlock { .. } => "insert block",
            Mutation::InsertIntoColumn { .. } => "insert into column",
            Mutation::MoveBlock { .. } => "move block",
            Mutation::RemoveBlock { .. } => "remove block",
            Mutation::DuplicateBlock { .. } => "duplicate block",
            Mutation::SetStyle { .. } => "set style",
            Mutation::RemoveStyle { .. } => "remove style",
            Mutation::UpdateContent { .. } => "update content",
            Mutation::SetDisplayOptions { .. } => "set display options",
            Mutation::SetStarred { .. } => "set starred",
        }
    }

    /// Validate, then return the edited copy of `doc`
    pub fn apply(&self, doc: &Document) -> Result<Document, MutationError> {
        self.validate(doc)?;

        let mut next = doc.clone();
        match self {
            Mutation::InsertBlock { index, block } => {
                let index = (*index).min(next.blocks.len());
                next.blocks.insert(index, block.clone());
            }

            Mutation::InsertIntoColumn {
                parent_id,
                column,
                index,
                block,
            } => {
                let column = column_mut(&mut next, parent_id, *column)?;
                insert_leaf(column, *index, block.clone());
            }

            Mutation::MoveBlock { block_id, to } => Self::apply_move(&mut next, block_id, to)?,

            Mutation::RemoveBlock { block_id } => {
                take_block(&mut next, block_id)?;
            }

            Mutation::DuplicateBlock { block_id } => Self::apply_duplicate(&mut next, block_id)?,

            Mutation::SetStyle {
                block_id,
                breakpoint,
                property,
                value,
            } => {
                let mut slot = block_mut(&mut next, block_id)?;
                for bp in breakpoints(*breakpoint) {
                    slot.styling_mut().set(bp, property.clone(), value.clone());
                }
            }

            Mutation::RemoveStyle {
                block_id,
                breakpoint,
                property,
            } => {
                let mut slot = block_mut(&mut next, block_id)?;
                for bp in breakpoints(*breakpoint) {
                    slot.styling_mut().get_mut(bp).remove(property);
                }
            }

            Mutation::UpdateContent { block_id, patch } => {
                Self::apply_update_content(&mut next, block_id, patch)?
            }

            Mutation::SetDisplayOptions { block_id, options } => {
                *block_mut(&mut next, block_id)?.display_options_mut() = *options;
            }

            Mutation::SetStarred { block_id, starred } => {
                *block_mut(&mut next, block_id)?.starred_mut() = *starred;
            }
        }

        Ok(next)
    }

    fn apply_move(
        doc: &mut Document,
        block_id: &str,
        to: &Destination,
    ) -> Result<(), MutationError> {
        if let (Some(BlockLocation::TopLevel { index: from }), Destination::Canvas { index }) =
            (doc.locate(block_id), to)
        {
            if from == *index {
                return Ok(());
            }
        }

        let moved = take_block(doc, block_id)?;

        match to {
            Destination::Canvas { index } => {
                let index = (*index).min(doc.blocks.len());
                doc.blocks.insert(index, moved);
            }
            Destination::Column {
                parent_id,
                column,
                index,
            } => {
                let leaf = LeafBlock::try_from(moved).map_err(|_| MutationError::NestedColumns)?;
                insert_leaf(column_mut(doc, parent_id, *column)?, *index, leaf);
            }
        }

        Ok(())
    }

    fn apply_duplicate(doc: &mut Document, block_id: &str) -> Result<(), MutationError> {
        match doc.locate(block_id) {
            Some(BlockLocation::TopLevel { index }) => {
                let copy = duplicate_block(&doc.blocks[index]);
                doc.blocks.insert(index + 1, copy);
                Ok(())
            }
            Some(BlockLocation::Nested {
                parent,
                column,
                index,
            }) => {
                let column = doc.blocks[parent]
                    .as_columns_mut()
                    .and_then(|c| c.columns.get_mut(column))
                    .ok_or_else(|| MutationError::not_found(block_id))?;
                let copy = duplicate_leaf_block_with(&mut ProcessIds, &column.blocks[index]);
                column.blocks.insert(index + 1, copy);
                Ok(())
            }
            None => Err(MutationError::not_found(block_id)),
        }
    }

    fn apply_update_content(
        doc: &mut Document,
        block_id: &str,
        patch: &Value,
    ) -> Result<(), MutationError> {
        let unrecognized = |content: &BlockContent| {
            matches!(content, BlockContent::Leaf(LeafContent::Unrecognized { .. }))
        };

        match block_mut(doc, block_id)? {
            BlockSlot::Top(block) => {
                let was_known = !unrecognized(&block.content);
                let content = patched::<BlockContent>(block.type_name(), &block.content, patch)?;
                if was_known && unrecognized(&content) {
                    return Err(shape_mismatch(block.type_name()));
                }
                block.content = content;
            }
            BlockSlot::Nested(block) => {
                let was_known = block.content.block_type().is_some();
                let content = patched::<LeafContent>(block.type_name(), &block.content, patch)?;
                if was_known && content.block_type().is_none() {
                    return Err(shape_mismatch(block.type_name()));
                }
                block.content = content;
            }
        }

        doc.validate()
            .map_err(|e| MutationError::InvalidContent(e.to_string()))
    }

    /// Validate without applying
    pub fn validate(&self, doc: &Document) -> Result<(), MutationError> {
        match self {
            Mutation::InsertBlock { block, .. } => {
                let incoming = Document::from_blocks(vec![block.clone()]).block_ids();
                ensure_ids_free(doc, incoming.iter().map(String::as_str))
            }

            Mutation::InsertIntoColumn {
                parent_id,
                column,
                block,
                ..
            } => {
                column_ref(doc, parent_id, *column)?;
                ensure_ids_free(doc, [block.id.as_str()])
            }

            Mutation::MoveBlock { block_id, to } => {
                let location = doc
                    .locate(block_id)
                    .ok_or_else(|| MutationError::not_found(block_id))?;

                if let Destination::Column {
                    parent_id, column, ..
                } = to
                {
                    if let BlockLocation::TopLevel { index } = location {
                        if doc.blocks[index].is_columns() {
                            return Err(MutationError::NestedColumns);
                        }
                    }
                    column_ref(doc, parent_id, *column)?;
                }
                Ok(())
            }

            Mutation::UpdateContent { block_id, patch } => {
                if !doc.contains_id(block_id) {
                    return Err(MutationError::not_found(block_id));
                }
                if !patch.is_object() {
                    return Err(MutationError::InvalidContent(
                        "content patch must be a JSON object".to_string(),
                    ));
                }
                Ok(())
            }

            Mutation::RemoveBlock { block_id }
            | Mutation::DuplicateBlock { block_id }
            | Mutation::SetStyle { block_id, .. }
            | Mutation::RemoveStyle { block_id, .. }
            | Mutation::SetDisplayOptions { block_id, .. }
            | Mutation::SetStarred { block_id, .. } => {
                if doc.contains_id(block_id) {
                    Ok(())
                } else {
                    Err(MutationError::not_found(block_id))
                }
            }
        }
    }
}

/// Mutable view of a block wherever it sits in the tree
enum BlockSlot<'a> {
    Top(&'a mut Block),
    Nested(&'a mut LeafBlock),
}

impl BlockSlot<'_> {
    fn styling_mut(&mut self) -> &mut Styling {
        match self {
            BlockSlot::Top(block) => &mut block.styling,
            BlockSlot::Nested(block) => &mut block.styling,
        }
    }

    fn display_options_mut(&mut self) -> &mut DisplayOptions {
        match self {
            BlockSlot::Top(block) => &mut block.display_options,
            BlockSlot::Nested(block) => &mut block.display_options,
        }
    }

    fn starred_mut(&mut self) -> &mut bool {
        match self {
            BlockSlot::Top(block) => &mut block.is_starred,
            BlockSlot::Nested(block) => &mut block.is_starred,
        }
    }
}

fn block_mut<'a>(doc: &'a mut Document, id: &str) -> Result<BlockSlot<'a>, MutationError> {
    match doc.locate(id) {
        Some(BlockLocation::TopLevel { index }) => Ok(BlockSlot::Top(&mut doc.blocks[index])),
        Some(BlockLocation::Nested {
            parent,
            column,
            index,
        }) => doc.blocks[parent]
            .as_columns_mut()
            .and_then(|c| c.columns.get_mut(column))
            .and_then(|c| c.blocks.get_mut(index))
            .map(BlockSlot::Nested)
            .ok_or_else(|| MutationError::not_found(id)),
        None => Err(MutationError::not_found(id)),
    }
}

/// Remove a block from the tree; nested blocks come back as top-level blocks
fn take_block(doc: &mut Document, id: &str) -> Result<Block, MutationError> {
    match doc.locate(id) {
        Some(BlockLocation::TopLevel { index }) => Ok(doc.blocks.remove(index)),
        Some(BlockLocation::Nested {
            parent,
            column,
            index,
        }) => doc.blocks[parent]
            .as_columns_mut()
            .and_then(|c| c.columns.get_mut(column))
            .filter(|c| index < c.blocks.len())
            .map(|c| Block::from(c.blocks.remove(index)))
            .ok_or_else(|| MutationError::not_found(id)),
        None => Err(MutationError::not_found(id)),
    }
}

fn column_ref<'a>(
    doc: &'a Document,
    parent_id: &str,
    column: usize,
) -> Result<&'a Column, MutationError> {
    let block = doc
        .get(parent_id)
        .ok_or_else(|| MutationError::not_found(parent_id))?;
    let columns = block
        .as_columns()
        .ok_or_else(|| MutationError::NotAColumnsBlock(parent_id.to_string()))?;
    columns
        .columns
        .get(column)
        .ok_or_else(|| MutationError::ColumnOutOfRange {
            block_id: parent_id.to_string(),
            column,
            count: columns.columns.len(),
        })
}

fn column_mut<'a>(
    doc: &'a mut Document,
    parent_id: &str,
    column: usize,
) -> Result<&'a mut Column, MutationError> {
    let block = doc
        .get_mut(parent_id)
        .ok_or_else(|| MutationError::not_found(parent_id))?;
    let columns = block
        .as_columns_mut()
        .ok_or_else(|| MutationError::NotAColumnsBlock(parent_id.to_string()))?;
    let count = columns.columns.len();
    columns
        .columns
        .get_mut(column)
        .ok_or_else(|| MutationError::ColumnOutOfRange {
            block_id: parent_id.to_string(),
            column,
            count,
        })
}

fn insert_leaf(column: &mut Column, index: Option<usize>, block: LeafBlock) {
    let len = column.blocks.len();
    let index = index.unwrap_or(len).min(len);
    column.blocks.insert(index, block);
}

fn ensure_ids_free<'a>(
    doc: &Document,
    ids: impl IntoIterator<Item = &'a str>,
) -> Result<(), MutationError> {
    for id in ids {
        if doc.contains_id(id) {
            return Err(MutationError::DuplicateId(id.to_string()));
        }
    }
    Ok(())
}

fn breakpoints(breakpoint: Option<Breakpoint>) -> Vec<Breakpoint> {
    match breakpoint {
        Some(bp) => vec![bp],
        None => Breakpoint::ALL.to_vec(),
    }
}

fn patched<C: BlockBody>(type_name: &str, content: &C, patch: &Value) -> Result<C, MutationError> {
    let mut value = content
        .to_value()
        .map_err(|e| MutationError::InvalidContent(e.to_string()))?;
    merge_patch(&mut value, patch);
    Ok(C::from_value(type_name, value))
}

fn shape_mismatch(type_name: &str) -> MutationError {
    MutationError::InvalidContent(format!("patch does not fit {} content", type_name))
}

/// JSON merge patch
fn merge_patch(target: &mut Value, patch: &Value) {
    let Value::Object(patch) = patch else {
        *target = patch.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(target) = target {
        for (key, value) in patch {
            if value.is_null() {
                target.remove(key);
            } else {
                merge_patch(target.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
    }
}
