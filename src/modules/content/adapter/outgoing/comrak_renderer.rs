use comrak::{markdown_to_html, Options};

use crate::content::application::ports::outgoing::markdown_renderer::{
    MarkdownRenderer, RenderError,
};

pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

/// CommonMark + GFM tables, strikethrough and autolinks. Raw HTML is escaped.
#[derive(Debug, Clone)]
pub struct ComrakRenderer {
    max_input_bytes: usize,
}

impl ComrakRenderer {
    pub fn new(max_input_bytes: usize) -> Self {
        Self { max_input_bytes }
    }
}

impl Default for ComrakRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INPUT_BYTES)
    }
}

impl MarkdownRenderer for ComrakRenderer {
    fn render(&self, markdown: &str) -> Result<String, RenderError> {
        if markdown.len() > self.max_input_bytes {
            return Err(RenderError::InputTooLarge {
                size: markdown.len(),
                limit: self.max_input_bytes,
            });
        }

        let mut options = Options::default();
        options.extension.table = true;
        options.extension.strikethrough = true;
        options.extension.autolink = true;

        Ok(markdown_to_html(markdown, &options))
    }
}
