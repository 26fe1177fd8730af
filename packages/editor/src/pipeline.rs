//! # Preview Pipeline
//!
//! Re-renders the session's document to HTML when it changes. Output is
//! cached by document version, so asking again without an edit is free.

use crate::EditSession;
use blockmail_compiler_html::{render_document_with, RenderOptions};
use tracing::debug;

pub struct Pipeline {
    options: RenderOptions,
    last: Option<PipelineResult>,
    renders: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineResult {
    /// Session version this output was rendered from
    pub version: u64,

    pub html: String,
}

impl Pipeline {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            last: None,
            renders: 0,
        }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Change render options (device mode, brand, width); drops the cache
    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
        self.clear_cache();
    }

    pub fn render(&mut self, session: &EditSession) -> &PipelineResult {
        let version = session.version();
        let fresh = matches!(&self.last, Some(last) if last.version == version);
        if !fresh {
            self.last = None;
        }

        let options = &self.options;
        let renders = &mut self.renders;
        self.last.get_or_insert_with(|| {
            debug!(version, "Rendering preview");
            *renders += 1;
            PipelineResult {
                version,
                html: render_document_with(session.document(), options),
            }
        })
    }

    /// Number of renders actually performed
    pub fn render_count(&self) -> usize {
        self.renders
    }

    pub fn last_result(&self) -> Option<&PipelineResult> {
        self.last.as_ref()
    }

    /// Force a full re-render on next request
    pub fn clear_cache(&mut self) {
        self.last = None;
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(RenderOptions::default())
    }
}
