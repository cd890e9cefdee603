use std::collections::BTreeMap;

use serde::Serialize;

use crate::content::domain::entities::Post;
use crate::content::domain::slug::resolve_slug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// Unique post categories in name order, each with the number of posts tagged with it.
pub fn categories(posts: &[Post]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for post in posts {
        let mut seen: Vec<&str> = Vec::new();
        for name in post.categories.iter().map(|c| c.trim()) {
            if name.is_empty() || seen.contains(&name) {
                continue;
            }
            seen.push(name);
            *counts.entry(name).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(name, count)| CategoryCount {
            name: name.to_string(),
            count,
        })
        .collect()
}

/// Posts tagged with `category`, case-insensitively, in their existing order.
pub fn posts_in_category<'a>(posts: &'a [Post], category: &str) -> Vec<&'a Post> {
    let wanted = category.trim();
    posts
        .iter()
        .filter(|p| p.categories.iter().any(|c| c.trim().eq_ignore_ascii_case(wanted)))
        .collect()
}

/// Look a post up by its resolved slug, then by id.
pub fn find_post<'a>(posts: &'a [Post], key: &str) -> Option<&'a Post> {
    posts
        .iter()
        .find(|p| resolve_slug(*p) == key)
        .or_else(|| posts.iter().find(|p| p.id == key))
}
