//! # Document
//!
//! Ordered list of top-level blocks. The order is the canvas render order.

use crate::block::*;
use crate::error::{ModelError, ModelResult};
use crate::ratio::ColumnRatio;
use crate::visitor::{walk_block, walk_column, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub blocks: Vec<Block>,
}

/// Where a block lives in the two-level tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockLocation {
    TopLevel {
        index: usize,
    },
    Nested {
        parent: usize,
        column: usize,
        index: usize,
    },
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    pub fn from_json(source: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(source)?)
    }

    pub fn to_json_pretty(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Index of a top-level block
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    /// Top-level block by id
    pub fn get(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Block> {
        self.blocks.iter_mut().find(|b| b.id == id)
    }

    pub fn locate(&self, id: &str) -> Option<BlockLocation> {
        if let Some(index) = self.index_of(id) {
            return Some(BlockLocation::TopLevel { index });
        }

        for (parent, block) in self.blocks.iter().enumerate() {
            let Some(columns) = block.as_columns() else {
                continue;
            };
            for (column, col) in columns.columns.iter().enumerate() {
                if let Some(index) = col.blocks.iter().position(|b| b.id == id) {
                    return Some(BlockLocation::Nested {
                        parent,
                        column,
                        index,
                    });
                }
            }
        }

        None
    }

    /// Block nested inside a column
    pub fn find_nested(&self, id: &str) -> Option<&LeafBlock> {
        match self.locate(id)? {
            BlockLocation::Nested {
                parent,
                column,
                index,
            } => self.blocks[parent]
                .as_columns()
                .and_then(|c| c.columns.get(column))
                .and_then(|c| c.blocks.get(index)),
            BlockLocation::TopLevel { .. } => None,
        }
    }

    /// Ids of every block, nested ones included, in tree order
    pub fn block_ids(&self) -> Vec<String> {
        let mut collector = IdCollector::default();
        collector.visit_document(self);
        collector.ids
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.locate(id).is_some()
    }

    /// Check the structural invariants: unique ids and ratio-consistent columns
    pub fn validate(&self) -> ModelResult<()> {
        let mut seen = HashSet::new();
        for id in self.block_ids() {
            if !seen.insert(id.clone()) {
                return Err(ModelError::duplicate_id(id));
            }
        }

        for block in &self.blocks {
            let Some(columns) = block.as_columns() else {
                continue;
            };
            let expected = ColumnRatio::parse(&columns.column_ratio)
                .map(|r| r.column_count())
                .unwrap_or(columns.column_count);
            if columns.columns.len() != expected {
                return Err(ModelError::ColumnCountMismatch {
                    id: block.id.clone(),
                    ratio: columns.column_ratio.clone(),
                    expected,
                    actual: columns.columns.len(),
                });
            }
        }

        Ok(())
    }
}

#[derive(Default)]
struct IdCollector {
    ids: Vec<String>,
}

impl Visitor for IdCollector {
    fn visit_block(&mut self, block: &Block) {
        self.ids.push(block.id.clone());
        walk_block(self, block);
    }

    fn visit_column(&mut self, column: &Column) {
        walk_column(self, column);
    }

    fn visit_nested_block(&mut self, block: &LeafBlock) {
        self.ids.push(block.id.clone());
    }
}
