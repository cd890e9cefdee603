use std::sync::LazyLock;

use regex::Regex;

use super::entities::Post;

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9\s_-]").expect("valid slug filter pattern"));
static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s_-]+").expect("valid slug separator pattern"));

/// Lowercase, hyphenated, `[a-z0-9-]` only. Idempotent.
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let filtered = DISALLOWED.replace_all(lowered.trim(), "");
    let hyphenated = SEPARATORS.replace_all(&filtered, "-");
    hyphenated.trim_matches('-').to_string()
}

/// Anything addressable by a URL slug.
pub trait Sluggable {
    fn explicit_slug(&self) -> Option<&str>;
    fn title(&self) -> &str;
    fn id(&self) -> &str;
}

impl Sluggable for Post {
    fn explicit_slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn id(&self) -> &str {
        &self.id
    }
}

/// Explicit slug, else slugified title, else the raw id.
pub fn resolve_slug<S: Sluggable + ?Sized>(entity: &S) -> String {
    if let Some(slug) = entity.explicit_slug().filter(|s| !s.is_empty()) {
        return slug.to_string();
    }

    let from_title = slugify(entity.title());
    if !from_title.is_empty() {
        return from_title;
    }

    entity.id().to_string()
}
