//! # Blockmail MJML Compiler
//!
//! Serializes block documents to MJML. Every top-level block becomes one
//! `mj-section`; a columns block maps each column to an `mj-column` sized
//! from the ratio width table.

mod compiler;

pub use compiler::{
    render_block_to_mjml, render_block_to_mjml_with, render_document_to_mjml,
    render_document_to_mjml_with,
};
