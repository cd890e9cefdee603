use tracing::warn;

use crate::content::application::ports::outgoing::MarkdownRenderer;

/// Shown in place of a document the renderer could not handle.
pub const RENDER_ERROR_FRAGMENT: &str = r#"<p class="render-error">Error rendering markdown.</p>"#;

/// Render a post body or preview. An absent or empty body is an empty
/// document; renderer failures become [`RENDER_ERROR_FRAGMENT`].
pub fn render_document(renderer: &dyn MarkdownRenderer, body: Option<&str>) -> String {
    let Some(body) = body.filter(|b| !b.trim().is_empty()) else {
        return String::new();
    };

    match renderer.render(body) {
        Ok(html) => html,
        Err(e) => {
            warn!("Markdown rendering failed: {}", e);
            RENDER_ERROR_FRAGMENT.to_string()
        }
    }
}
