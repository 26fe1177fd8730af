//! # Blockmail HTML Compiler
//!
//! Renders block documents to inline-styled HTML. Column layouts become
//! presentation tables sized from the ratio width table.

mod compiler;
mod context;

pub use blockmail_model::get_column_widths;
pub use compiler::{
    render_block_to_html, render_block_with, render_document, render_document_with,
    render_leaf_with,
};
pub use context::{escape_html, Context, RenderOptions, DEFAULT_MAX_WIDTH};
