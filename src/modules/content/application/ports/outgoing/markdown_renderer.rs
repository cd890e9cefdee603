#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Document too large: {size} bytes (limit {limit})")]
    InputTooLarge { size: usize, limit: usize },

    #[error("Markdown engine error: {0}")]
    Engine(String),
}

/// Markdown in, HTML out.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> Result<String, RenderError>;
}
