use crate::content::adapter::outgoing::memory_store::InMemoryRemoteStore;
use crate::content::application::ports::outgoing::RemoteStore;
use crate::content::domain::defaults::default_profile;
use crate::content::domain::entities::{
    ContentBundle, ContentCategory, MediaItem, MediaType, Photo, Post, Project, Talk, ToolSection,
};

/// A bundle that differs from the built-in defaults in every category.
pub fn remote_bundle() -> ContentBundle {
    let mut profile = default_profile();
    profile.name = "Remote Author".to_string();
    profile.bio_title = "Writing from the remote store".to_string();

    ContentBundle {
        profile,
        posts: vec![
            Post {
                id: "post-rust".to_string(),
                slug: None,
                title: "Learning Rust the Hard Way".to_string(),
                date: "Jan 5, 2025".to_string(),
                duration: "8 min".to_string(),
                categories: vec!["tech".to_string(), "rust".to_string()],
                content: Some("# Ownership\n\nBorrow **carefully**.".to_string()),
            },
            Post {
                id: "post-kyoto".to_string(),
                slug: Some("autumn-in-kyoto".to_string()),
                title: "Autumn in Kyoto".to_string(),
                date: "Nov 2, 2024".to_string(),
                duration: "4 min".to_string(),
                categories: vec!["travel".to_string()],
                content: None,
            },
        ],
        projects: vec![Project {
            id: "project-cms".to_string(),
            name: "Headless CMS".to_string(),
            description: "Content for the portfolio".to_string(),
            link: "https://example.com/cms".to_string(),
            github: Some("https://github.com/example/cms".to_string()),
            icon: None,
        }],
        talks: vec![Talk {
            id: "talk-rustconf".to_string(),
            title: "Caching Without Tears".to_string(),
            event: "RustConf".to_string(),
            date: "2025-09-10".to_string(),
            link: "https://example.com/talk".to_string(),
            location: Some("Montreal".to_string()),
        }],
        media: vec![MediaItem {
            id: "media-article".to_string(),
            title: "Stale While Revalidate, Explained".to_string(),
            link: "https://example.com/article".to_string(),
            kind: MediaType::Article,
        }],
        photos: vec![Photo {
            id: "photo-fuji".to_string(),
            url: "https://example.com/fuji.jpg".to_string(),
            caption: "Fuji at dawn".to_string(),
        }],
        tool_sections: vec![ToolSection {
            id: "tools-desk".to_string(),
            title: "Desk".to_string(),
            items: vec!["Standing desk".to_string()],
        }],
    }
}

/// Write every record of `bundle` into the store, lists in order.
pub async fn seed_remote(store: &InMemoryRemoteStore, bundle: &ContentBundle) {
    async fn put<T: serde::Serialize>(
        store: &InMemoryRemoteStore,
        category: ContentCategory,
        record: &T,
    ) {
        let value = serde_json::to_value(record).expect("fixture serializes");
        store
            .upsert(category, value)
            .await
            .expect("in-memory upsert");
    }

    put(store, ContentCategory::Profile, &bundle.profile).await;
    for post in &bundle.posts {
        put(store, ContentCategory::Posts, post).await;
    }
    for project in &bundle.projects {
        put(store, ContentCategory::Projects, project).await;
    }
    for talk in &bundle.talks {
        put(store, ContentCategory::Talks, talk).await;
    }
    for item in &bundle.media {
        put(store, ContentCategory::Media, item).await;
    }
    for photo in &bundle.photos {
        put(store, ContentCategory::Photos, photo).await;
    }
    for section in &bundle.tool_sections {
        put(store, ContentCategory::ToolSections, section).await;
    }
}
