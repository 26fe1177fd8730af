//! # Blockmail Model
//!
//! The block document model for the email builder: a closed set of block
//! variants arranged in a two-level tree (document → blocks → columns → leaf
//! blocks), plus the factory that is the only way to construct new blocks.

pub mod block;
pub mod content;
pub mod document;
pub mod error;
pub mod factory;
pub mod id_generator;
pub mod ratio;
pub mod styling;
pub mod visitor;

pub use block::{
    Block, BlockBody, BlockContent, BlockType, Column, ColumnsContent, LeafBlock, LeafContent,
};
pub use content::*;
pub use document::{BlockLocation, Document};
pub use error::{ModelError, ModelResult};
pub use factory::{
    build_block, create_block, create_block_with, create_columns_block, create_columns_block_with,
    create_leaf_block, create_leaf_block_with, default_leaf_content, default_styling,
    duplicate_block, duplicate_block_with, duplicate_leaf_block_with,
};
pub use id_generator::{get_seed, new_id, IdGenerator, IdSource, ProcessIds};
pub use ratio::{get_column_widths, ColumnRatio};
pub use styling::{Breakpoint, DisplayOptions, Position, StyleMap, Styling};
pub use visitor::{Visitor, VisitorMut};
