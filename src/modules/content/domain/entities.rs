// src/modules/content/domain/entities.rs

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Well-known identifier of the singleton profile row.
pub const PROFILE_ID: &str = "00000000-0000-0000-0000-000000000000";

/// Generate a fresh record identifier. Never reused.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

fn profile_id() -> String {
    PROFILE_ID.to_string()
}

/// Treat an explicit JSON `null` the same as an omitted field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

//
// ──────────────────────────────────────────────────────────
// Categories
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentCategory {
    Profile,
    Posts,
    Projects,
    Talks,
    Media,
    Photos,
    ToolSections,
}

/// Ordering hint passed to the remote store on select-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub column: &'static str,
    pub descending: bool,
}

impl ContentCategory {
    pub const ALL: [ContentCategory; 7] = [
        ContentCategory::Profile,
        ContentCategory::Posts,
        ContentCategory::Projects,
        ContentCategory::Talks,
        ContentCategory::Media,
        ContentCategory::Photos,
        ContentCategory::ToolSections,
    ];

    /// Name of the backing table in the remote store.
    pub fn table_name(&self) -> &'static str {
        match self {
            ContentCategory::Profile => "site_config",
            ContentCategory::Posts => "posts",
            ContentCategory::Projects => "projects",
            ContentCategory::Talks => "talks",
            ContentCategory::Media => "media",
            ContentCategory::Photos => "photos",
            ContentCategory::ToolSections => "tool_sections",
        }
    }

    pub fn order_hint(&self) -> Option<SortOrder> {
        match self {
            ContentCategory::Posts | ContentCategory::Projects => Some(SortOrder {
                column: "created_at",
                descending: true,
            }),
            ContentCategory::Talks => Some(SortOrder {
                column: "date",
                descending: true,
            }),
            _ => None,
        }
    }

    pub fn is_singleton(&self) -> bool {
        matches!(self, ContentCategory::Profile)
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown content category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ContentCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "site_config" | "profile" => Ok(ContentCategory::Profile),
            "posts" => Ok(ContentCategory::Posts),
            "projects" => Ok(ContentCategory::Projects),
            "talks" => Ok(ContentCategory::Talks),
            "media" => Ok(ContentCategory::Media),
            "photos" => Ok(ContentCategory::Photos),
            "tool_sections" | "use" => Ok(ContentCategory::ToolSections),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Profile
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BadgeItem {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub id: String,
    pub role: String,
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CertificationStack {
    Cloud,
    Devops,
    Security,
    Engineering,
    Data,
    Programming,
    Database,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Certification {
    pub id: String,
    pub name: String,
    pub issuer: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
    #[serde(
        rename = "credentialLink",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub credential_link: Option<String>,
    pub stack: CertificationStack,
}

/// Singleton site profile, stored in the `site_config` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default = "profile_id")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bio_title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub affiliations: Vec<BadgeItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub core_team: Vec<BadgeItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub maintaining: Vec<BadgeItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_projects: Vec<BadgeItem>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experiences: Vec<Experience>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certifications: Vec<Certification>,
}

//
// ──────────────────────────────────────────────────────────
// Collections
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub link: String,
    /// Source repository reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Talk {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub event: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub link: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Video,
    Podcast,
    Article,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(rename = "type")]
    pub kind: MediaType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

/// A labeled group of equipment or software.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSection {
    pub id: String,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<String>,
}

//
// ──────────────────────────────────────────────────────────
// Record trait
// ──────────────────────────────────────────────────────────
//

/// A row of one content table, keyed by a unique identifier.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const CATEGORY: ContentCategory;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);
}

impl Record for Profile {
    const CATEGORY: ContentCategory = ContentCategory::Profile;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Record for Post {
    const CATEGORY: ContentCategory = ContentCategory::Posts;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Record for Project {
    const CATEGORY: ContentCategory = ContentCategory::Projects;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Record for Talk {
    const CATEGORY: ContentCategory = ContentCategory::Talks;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Record for MediaItem {
    const CATEGORY: ContentCategory = ContentCategory::Media;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Record for Photo {
    const CATEGORY: ContentCategory = ContentCategory::Photos;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

impl Record for ToolSection {
    const CATEGORY: ContentCategory = ContentCategory::ToolSections;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }
}

//
// ──────────────────────────────────────────────────────────
// ContentRecord (one record of any category)
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ContentRecord {
    Profile(Profile),
    Post(Post),
    Project(Project),
    Talk(Talk),
    Media(MediaItem),
    Photo(Photo),
    ToolSection(ToolSection),
}

impl ContentRecord {
    pub fn category(&self) -> ContentCategory {
        match self {
            ContentRecord::Profile(_) => ContentCategory::Profile,
            ContentRecord::Post(_) => ContentCategory::Posts,
            ContentRecord::Project(_) => ContentCategory::Projects,
            ContentRecord::Talk(_) => ContentCategory::Talks,
            ContentRecord::Media(_) => ContentCategory::Media,
            ContentRecord::Photo(_) => ContentCategory::Photos,
            ContentRecord::ToolSection(_) => ContentCategory::ToolSections,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ContentRecord::Profile(r) => &r.id,
            ContentRecord::Post(r) => &r.id,
            ContentRecord::Project(r) => &r.id,
            ContentRecord::Talk(r) => &r.id,
            ContentRecord::Media(r) => &r.id,
            ContentRecord::Photo(r) => &r.id,
            ContentRecord::ToolSection(r) => &r.id,
        }
    }

    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Decode a JSON record for the given category.
    pub fn from_value(
        category: ContentCategory,
        value: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match category {
            ContentCategory::Profile => ContentRecord::Profile(serde_json::from_value(value)?),
            ContentCategory::Posts => ContentRecord::Post(serde_json::from_value(value)?),
            ContentCategory::Projects => ContentRecord::Project(serde_json::from_value(value)?),
            ContentCategory::Talks => ContentRecord::Talk(serde_json::from_value(value)?),
            ContentCategory::Media => ContentRecord::Media(serde_json::from_value(value)?),
            ContentCategory::Photos => ContentRecord::Photo(serde_json::from_value(value)?),
            ContentCategory::ToolSections => {
                ContentRecord::ToolSection(serde_json::from_value(value)?)
            }
        })
    }

    /// Default-populated record for a "new" action. `None` for the profile,
    /// which is never created explicitly.
    pub fn stub(category: ContentCategory, today: &str) -> Option<Self> {
        let id = new_record_id();
        let record = match category {
            ContentCategory::Profile => return None,
            ContentCategory::Posts => ContentRecord::Post(Post {
                id,
                slug: None,
                title: "Untitled Post".to_string(),
                date: today.to_string(),
                duration: "5 min".to_string(),
                categories: Vec::new(),
                content: Some(String::new()),
            }),
            ContentCategory::Projects => ContentRecord::Project(Project {
                id,
                name: "New Project".to_string(),
                description: String::new(),
                link: String::new(),
                github: Some(String::new()),
                icon: None,
            }),
            ContentCategory::Talks => ContentRecord::Talk(Talk {
                id,
                title: "New Talk".to_string(),
                event: String::new(),
                date: String::new(),
                link: String::new(),
                location: Some(String::new()),
            }),
            ContentCategory::Media => ContentRecord::Media(MediaItem {
                id,
                title: "New Media".to_string(),
                link: String::new(),
                kind: MediaType::Video,
            }),
            ContentCategory::Photos => ContentRecord::Photo(Photo {
                id,
                url: String::new(),
                caption: String::new(),
            }),
            ContentCategory::ToolSections => ContentRecord::ToolSection(ToolSection {
                id,
                title: "New Section".to_string(),
                items: Vec::new(),
            }),
        };
        Some(record)
    }
}

impl From<Profile> for ContentRecord {
    fn from(r: Profile) -> Self {
        ContentRecord::Profile(r)
    }
}

impl From<Post> for ContentRecord {
    fn from(r: Post) -> Self {
        ContentRecord::Post(r)
    }
}

impl From<Project> for ContentRecord {
    fn from(r: Project) -> Self {
        ContentRecord::Project(r)
    }
}

impl From<Talk> for ContentRecord {
    fn from(r: Talk) -> Self {
        ContentRecord::Talk(r)
    }
}

impl From<MediaItem> for ContentRecord {
    fn from(r: MediaItem) -> Self {
        ContentRecord::Media(r)
    }
}

impl From<Photo> for ContentRecord {
    fn from(r: Photo) -> Self {
        ContentRecord::Photo(r)
    }
}

impl From<ToolSection> for ContentRecord {
    fn from(r: ToolSection) -> Self {
        ContentRecord::ToolSection(r)
    }
}

//
// ──────────────────────────────────────────────────────────
// Bundle
// ──────────────────────────────────────────────────────────
//

/// All seven content categories as returned by one data-layer read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBundle {
    pub profile: Profile,
    pub posts: Vec<Post>,
    pub projects: Vec<Project>,
    pub talks: Vec<Talk>,
    pub media: Vec<MediaItem>,
    pub photos: Vec<Photo>,
    pub tool_sections: Vec<ToolSection>,
}

fn upsert_in<T: Record>(list: &mut Vec<T>, record: T, at_front: bool) {
    if let Some(existing) = list.iter_mut().find(|r| r.id() == record.id()) {
        *existing = record;
    } else if at_front {
        list.insert(0, record);
    } else {
        list.push(record);
    }
}

fn remove_from<T: Record>(list: &mut Vec<T>, id: &str) -> bool {
    let before = list.len();
    list.retain(|r| r.id() != id);
    list.len() != before
}

impl ContentBundle {
    /// In-memory state before the first load: default profile, empty lists.
    pub fn initial(profile: Profile) -> Self {
        Self {
            profile,
            posts: Vec::new(),
            projects: Vec::new(),
            talks: Vec::new(),
            media: Vec::new(),
            photos: Vec::new(),
            tool_sections: Vec::new(),
        }
    }

    /// Replace the record with the same id, or add it. New tool sections go
    /// to the end, every other new record to the front.
    pub fn apply(&mut self, record: ContentRecord) {
        match record {
            ContentRecord::Profile(r) => self.profile = r,
            ContentRecord::Post(r) => upsert_in(&mut self.posts, r, true),
            ContentRecord::Project(r) => upsert_in(&mut self.projects, r, true),
            ContentRecord::Talk(r) => upsert_in(&mut self.talks, r, true),
            ContentRecord::Media(r) => upsert_in(&mut self.media, r, true),
            ContentRecord::Photo(r) => upsert_in(&mut self.photos, r, true),
            ContentRecord::ToolSection(r) => upsert_in(&mut self.tool_sections, r, false),
        }
    }

    /// Remove a record from a list category. Returns whether anything was removed.
    pub fn remove(&mut self, category: ContentCategory, id: &str) -> bool {
        match category {
            ContentCategory::Profile => false,
            ContentCategory::Posts => remove_from(&mut self.posts, id),
            ContentCategory::Projects => remove_from(&mut self.projects, id),
            ContentCategory::Talks => remove_from(&mut self.talks, id),
            ContentCategory::Media => remove_from(&mut self.media, id),
            ContentCategory::Photos => remove_from(&mut self.photos, id),
            ContentCategory::ToolSections => remove_from(&mut self.tool_sections, id),
        }
    }

    /// Every list record, each given a freshly generated id.
    pub fn list_records_with_fresh_ids(&self) -> Vec<ContentRecord> {
        fn fresh<T: Record + Into<ContentRecord>>(list: &[T], out: &mut Vec<ContentRecord>) {
            for item in list {
                let mut item = item.clone();
                item.set_id(new_record_id());
                out.push(item.into());
            }
        }

        let mut out = Vec::new();
        fresh(&self.posts, &mut out);
        fresh(&self.projects, &mut out);
        fresh(&self.talks, &mut out);
        fresh(&self.media, &mut out);
        fresh(&self.photos, &mut out);
        fresh(&self.tool_sections, &mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::domain::defaults::{default_bundle, default_profile};
    use serde_json::json;

    fn post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            slug: None,
            title: format!("Post {id}"),
            date: "Oct 12, 2024".to_string(),
            duration: "3 min".to_string(),
            categories: vec![],
            content: None,
        }
    }

    #[test]
    fn category_round_trips_through_table_name() {
        for category in ContentCategory::ALL {
            assert_eq!(
                category.table_name().parse::<ContentCategory>().unwrap(),
                category
            );
        }
        assert!("comments".parse::<ContentCategory>().is_err());
    }

    #[test]
    fn profile_tolerates_null_collections() {
        let profile: Profile = serde_json::from_value(json!({
            "id": PROFILE_ID,
            "name": "Jane",
            "bio_title": "Hello",
            "affiliations": null,
            "core_team": [{ "id": "1", "label": "Team", "href": "#" }]
        }))
        .unwrap();

        assert!(profile.affiliations.is_empty());
        assert_eq!(profile.core_team.len(), 1);
        assert!(profile.certifications.is_empty());
    }

    #[test]
    fn media_type_uses_type_key() {
        let item: MediaItem = serde_json::from_value(json!({
            "id": "m1", "title": "Talk show", "link": "#", "type": "podcast"
        }))
        .unwrap();
        assert_eq!(item.kind, MediaType::Podcast);

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "podcast");
    }

    #[test]
    fn unknown_media_type_is_rejected() {
        let res: Result<MediaItem, _> = serde_json::from_value(json!({
            "id": "m1", "title": "x", "link": "#", "type": "livestream"
        }));
        assert!(res.is_err());
    }

    #[test]
    fn apply_replaces_existing_and_prepends_new() {
        let mut bundle = ContentBundle::initial(default_profile());
        bundle.apply(post("a").into());
        bundle.apply(post("b").into());

        let mut edited = post("a");
        edited.title = "Edited".to_string();
        bundle.apply(edited.into());

        let ids: Vec<_> = bundle.posts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(bundle.posts[1].title, "Edited");
    }

    #[test]
    fn remove_ignores_profile_and_missing_ids() {
        let mut bundle = ContentBundle::initial(default_profile());
        bundle.apply(post("a").into());

        assert!(!bundle.remove(ContentCategory::Profile, PROFILE_ID));
        assert!(!bundle.remove(ContentCategory::Posts, "missing"));
        assert!(bundle.remove(ContentCategory::Posts, "a"));
        assert!(bundle.posts.is_empty());
    }

    #[test]
    fn stubs_get_unique_ids() {
        let a = ContentRecord::stub(ContentCategory::Talks, "today").unwrap();
        let b = ContentRecord::stub(ContentCategory::Talks, "today").unwrap();
        assert_ne!(a.id(), b.id());
        assert!(ContentRecord::stub(ContentCategory::Profile, "today").is_none());
    }

    #[test]
    fn fresh_ids_never_reuse_existing_ones() {
        let bundle = default_bundle();
        let records = bundle.list_records_with_fresh_ids();

        let expected = bundle.posts.len()
            + bundle.projects.len()
            + bundle.talks.len()
            + bundle.media.len()
            + bundle.photos.len()
            + bundle.tool_sections.len();
        assert_eq!(records.len(), expected);
        for record in &records {
            assert!(Uuid::parse_str(record.id()).is_ok());
            assert_ne!(record.id(), PROFILE_ID);
        }
    }
}
