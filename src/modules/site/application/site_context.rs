// src/modules/site/application/site_context.rs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::try_join_all;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::auth::application::ports::outgoing::{AuthError, AuthProvider};
use crate::auth::domain::entities::{AuthEvent, AuthState, Credentials, Session};
use crate::content::application::ports::outgoing::{Clock, RemoteStore, RemoteStoreError, SystemClock};
use crate::content::application::services::content_cache::ContentCache;
use crate::content::domain::defaults::{default_bundle, default_profile};
use crate::content::domain::entities::{
    ContentBundle, ContentCategory, ContentRecord, MediaItem, Photo, Post, Profile, Project, Talk,
    ToolSection, PROFILE_ID,
};

pub const DEFAULT_INIT_TIMEOUT: Duration = Duration::from_secs(10);

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SaveError {
    #[error(transparent)]
    Remote(#[from] RemoteStoreError),

    #[error("Could not encode record: {0}")]
    Serialization(String),

    #[error("The {0} category holds a single record and cannot be created or deleted")]
    SingletonCategory(ContentCategory),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    #[error("Sign in to access the admin area")]
    NotAuthenticated,
}

/// Clears the loading flag however the guarded scope exits.
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn engage(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

//
// ──────────────────────────────────────────────────────────
// State container
// ──────────────────────────────────────────────────────────
//

/// Single source of truth for content and authentication during a session.
///
/// Setters mutate in-memory state only; persisting is an explicit
/// [`save_data`](Self::save_data) or [`delete_record`](Self::delete_record).
pub struct SiteContext {
    cache: ContentCache,
    remote: Arc<dyn RemoteStore>,
    auth: Arc<dyn AuthProvider>,
    clock: Arc<dyn Clock>,
    content: RwLock<ContentBundle>,
    authenticated: AtomicBool,
    loading: AtomicBool,
    init_timeout: Duration,
}

impl SiteContext {
    pub fn new(
        cache: ContentCache,
        remote: Arc<dyn RemoteStore>,
        auth: Arc<dyn AuthProvider>,
        init_timeout: Duration,
    ) -> Self {
        Self::with_clock(cache, remote, auth, Arc::new(SystemClock), init_timeout)
    }

    pub fn with_clock(
        cache: ContentCache,
        remote: Arc<dyn RemoteStore>,
        auth: Arc<dyn AuthProvider>,
        clock: Arc<dyn Clock>,
        init_timeout: Duration,
    ) -> Self {
        Self {
            cache,
            remote,
            auth,
            clock,
            content: RwLock::new(ContentBundle::initial(default_profile())),
            authenticated: AtomicBool::new(false),
            loading: AtomicBool::new(true),
            init_timeout,
        }
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    // ──────────────────────────────────────────────────────
    // Loading
    // ──────────────────────────────────────────────────────

    /// Check the session, then load content through the cache. Bounded by the
    /// init timeout; the loading flag is cleared on every path.
    pub async fn initialize(&self) {
        let _loading = LoadingGuard::engage(&self.loading);

        match tokio::time::timeout(self.init_timeout, self.load_initial()).await {
            Ok(()) => info!("Site context initialized"),
            Err(_) => warn!(
                "Initialization did not finish within {:?}; serving current state",
                self.init_timeout
            ),
        }
    }

    async fn load_initial(&self) {
        self.sync_session().await;
        let bundle = self.cache.get_all_data(false).await;
        *self.content.write().await = bundle;
    }

    /// Reload every collection, bypassing the cache. The loading flag tracks
    /// the initial load only and is left as is.
    pub async fn refresh_data(&self) {
        let bundle = self.cache.get_all_data(true).await;
        *self.content.write().await = bundle;
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    // ──────────────────────────────────────────────────────
    // Persistence
    // ──────────────────────────────────────────────────────

    /// Upsert one record remotely, then invalidate the cache, returning the
    /// record as stored. A profile is always written under [`PROFILE_ID`] and
    /// patched into memory; list records are left to the caller.
    pub async fn save_data(&self, mut record: ContentRecord) -> Result<ContentRecord, SaveError> {
        if let ContentRecord::Profile(profile) = &mut record {
            if profile.id != PROFILE_ID {
                debug!(sent = %profile.id, "Pinning profile to the singleton id");
                profile.id = PROFILE_ID.to_string();
            }
        }

        let category = record.category();
        let value = record
            .to_value()
            .map_err(|e| SaveError::Serialization(e.to_string()))?;

        if let Err(e) = self.remote.upsert(category, value).await {
            error!("Error saving to {}: {}", category.table_name(), e);
            return Err(e.into());
        }

        self.cache.invalidate_cache().await;

        if let ContentRecord::Profile(profile) = &record {
            self.content.write().await.profile = profile.clone();
        }
        Ok(record)
    }

    /// Delete remotely first; memory and cache change only on success.
    pub async fn delete_record(&self, category: ContentCategory, id: &str) -> Result<(), SaveError> {
        if category.is_singleton() {
            return Err(SaveError::SingletonCategory(category));
        }

        if let Err(e) = self.remote.delete(category, id).await {
            error!("Error deleting {} from {}: {}", id, category.table_name(), e);
            return Err(e.into());
        }

        if !self.content.write().await.remove(category, id) {
            debug!("Deleted {} {} was not loaded locally", category, id);
        }
        self.cache.invalidate_cache().await;
        Ok(())
    }

    /// Insert a default-populated record into memory and return it. Not persisted.
    pub async fn add_new(&self, category: ContentCategory) -> Result<ContentRecord, SaveError> {
        let today = self.clock.now().format("%a %b %d %Y").to_string();
        let record =
            ContentRecord::stub(category, &today).ok_or(SaveError::SingletonCategory(category))?;

        self.content.write().await.apply(record.clone());
        Ok(record)
    }

    /// Overwrite remote content with the built-in defaults, each list record
    /// under a fresh id, then reload. Stray profile rows are removed first.
    pub async fn seed_defaults(&self) -> Result<(), SaveError> {
        let defaults = default_bundle();
        if let Err(e) = self
            .remote
            .delete_except(ContentCategory::Profile, PROFILE_ID)
            .await
        {
            error!("Error clearing {}: {}", ContentCategory::Profile.table_name(), e);
            return Err(e.into());
        }

        self.save_data(ContentRecord::Profile(defaults.profile.clone()))
            .await?;

        let records = defaults.list_records_with_fresh_ids();
        let count = records.len();
        try_join_all(records.into_iter().map(|record| self.save_data(record))).await?;

        self.cache.invalidate_cache().await;
        info!(records = count, "Seeded remote store with default content");
        self.refresh_data().await;
        Ok(())
    }

    // ──────────────────────────────────────────────────────
    // Authentication
    // ──────────────────────────────────────────────────────

    pub fn auth_state(&self) -> AuthState {
        if self.is_authenticated() {
            AuthState::Authenticated
        } else {
            AuthState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    fn set_auth_state(&self, state: AuthState) {
        let authenticated = state == AuthState::Authenticated;
        if self.authenticated.swap(authenticated, Ordering::SeqCst) != authenticated {
            info!("Auth state changed to {:?}", state);
        }
    }

    pub fn require_admin(&self) -> Result<(), AccessError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(AccessError::NotAuthenticated)
        }
    }

    /// Align the auth state with the provider's current session. Provider
    /// errors leave the state unchanged.
    pub async fn sync_session(&self) {
        match self.auth.current_session().await {
            Ok(Some(_)) => self.set_auth_state(AuthState::Authenticated),
            Ok(None) => self.set_auth_state(AuthState::Anonymous),
            Err(e) => warn!("Session check failed: {}", e),
        }
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        let session = self.auth.sign_in(credentials).await?;
        self.set_auth_state(AuthState::Authenticated);
        Ok(session)
    }

    /// Always reports success for a non-empty email, whatever the provider says.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(AuthError::MissingEmail);
        }

        if let Err(e) = self.auth.request_password_reset(email).await {
            warn!("Password reset request failed: {}", e);
        }
        Ok(())
    }

    pub async fn logout(&self) {
        if let Err(e) = self.auth.sign_out().await {
            warn!("Remote sign-out failed: {}", e);
        }
        self.set_auth_state(AuthState::Anonymous);
        self.cache.invalidate_cache().await;
    }

    /// Follow the provider's session-change notifications until the provider
    /// goes away or this context is dropped.
    pub fn watch_auth(self: &Arc<Self>) -> JoinHandle<()> {
        let mut events = self.auth.subscribe();
        let weak = Arc::downgrade(self);

        tokio::spawn(async move {
            loop {
                let event = events.recv().await;
                let Some(site) = weak.upgrade() else {
                    break;
                };

                match event {
                    Ok(event) => site.apply_auth_event(&event),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "Missed auth events; re-checking session");
                        site.sync_session().await;
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            debug!("Auth watcher stopped");
        })
    }

    pub fn apply_auth_event(&self, event: &AuthEvent) {
        self.set_auth_state(event.target_state());
    }

    // ──────────────────────────────────────────────────────
    // In-memory state
    // ──────────────────────────────────────────────────────

    pub async fn snapshot(&self) -> ContentBundle {
        self.content.read().await.clone()
    }

    pub async fn profile(&self) -> Profile {
        self.content.read().await.profile.clone()
    }

    pub async fn posts(&self) -> Vec<Post> {
        self.content.read().await.posts.clone()
    }

    pub async fn projects(&self) -> Vec<Project> {
        self.content.read().await.projects.clone()
    }

    pub async fn talks(&self) -> Vec<Talk> {
        self.content.read().await.talks.clone()
    }

    pub async fn media(&self) -> Vec<MediaItem> {
        self.content.read().await.media.clone()
    }

    pub async fn photos(&self) -> Vec<Photo> {
        self.content.read().await.photos.clone()
    }

    pub async fn tool_sections(&self) -> Vec<ToolSection> {
        self.content.read().await.tool_sections.clone()
    }

    pub async fn set_profile(&self, profile: Profile) {
        self.content.write().await.profile = profile;
    }

    pub async fn set_posts(&self, posts: Vec<Post>) {
        self.content.write().await.posts = posts;
    }

    pub async fn set_projects(&self, projects: Vec<Project>) {
        self.content.write().await.projects = projects;
    }

    pub async fn set_talks(&self, talks: Vec<Talk>) {
        self.content.write().await.talks = talks;
    }

    pub async fn set_media(&self, media: Vec<MediaItem>) {
        self.content.write().await.media = media;
    }

    pub async fn set_photos(&self, photos: Vec<Photo>) {
        self.content.write().await.photos = photos;
    }

    pub async fn set_tool_sections(&self, tool_sections: Vec<ToolSection>) {
        self.content.write().await.tool_sections = tool_sections;
    }

    /// Replace or add one record in memory.
    pub async fn update_record(&self, record: ContentRecord) {
        self.content.write().await.apply(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use mockall::mock;
    use tokio::sync::broadcast;

    use crate::auth::adapter::outgoing::memory_auth::InMemoryAuth;
    use crate::content::adapter::outgoing::memory_storage::MemoryStorage;
    use crate::content::adapter::outgoing::memory_store::InMemoryRemoteStore;
    use crate::content::application::ports::outgoing::KeyValueStore;
    use crate::content::application::services::content_cache::CacheSettings;
    use crate::content::domain::defaults::default_posts;
    use crate::tests::support::clock::ManualClock;
    use crate::tests::support::fixtures::{remote_bundle, seed_remote};

    const ADMIN_EMAIL: &str = "admin@example.com";
    const ADMIN_PASSWORD: &str = "correct horse";

    mock! {
        pub Auth {}
        #[async_trait]
        impl AuthProvider for Auth {
            async fn current_session(&self) -> Result<Option<Session>, AuthError>;
            async fn sign_in(&self, credentials: &Credentials) -> Result<Session, AuthError>;
            async fn sign_out(&self) -> Result<(), AuthError>;
            async fn request_password_reset(&self, email: &str) -> Result<(), AuthError>;
            fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
        }
    }

    // ──────────────────────────────────────────────────────────
    // Helpers
    // ──────────────────────────────────────────────────────────

    struct Harness {
        site: Arc<SiteContext>,
        remote: Arc<InMemoryRemoteStore>,
        storage: Arc<MemoryStorage>,
        auth: Arc<InMemoryAuth>,
    }

    fn harness() -> Harness {
        let remote = Arc::new(InMemoryRemoteStore::new());
        let storage = Arc::new(MemoryStorage::new());
        let auth = Arc::new(InMemoryAuth::new().with_account(ADMIN_EMAIL, ADMIN_PASSWORD));
        let clock = Arc::new(ManualClock::at(Utc.with_ymd_and_hms(2024, 10, 12, 9, 0, 0).unwrap()));
        let cache = ContentCache::with_clock(
            remote.clone(),
            storage.clone(),
            clock.clone(),
            CacheSettings::default(),
        );
        let site = Arc::new(SiteContext::with_clock(
            cache,
            remote.clone(),
            auth.clone(),
            clock,
            DEFAULT_INIT_TIMEOUT,
        ));

        Harness {
            site,
            remote,
            storage,
            auth,
        }
    }

    fn project(id: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            link: String::new(),
            github: None,
            icon: None,
        }
    }

    // ──────────────────────────────────────────────────────────
    // Initialization
    // ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn starts_loading_with_default_profile() {
        let h = harness();

        assert!(h.site.is_loading());
        assert_eq!(h.site.profile().await, default_profile());
        assert!(h.site.posts().await.is_empty());
    }

    #[tokio::test]
    async fn initialize_loads_remote_content() {
        let h = harness();
        let bundle = remote_bundle();
        seed_remote(&h.remote, &bundle).await;

        h.site.initialize().await;

        assert!(!h.site.is_loading());
        assert_eq!(h.site.posts().await, bundle.posts);
        assert_eq!(h.site.auth_state(), AuthState::Anonymous);
    }

    #[tokio::test]
    async fn initialize_detects_existing_session() {
        let h = harness();
        h.auth
            .sign_in(&Credentials::new(ADMIN_EMAIL, ADMIN_PASSWORD))
            .await
            .unwrap();

        h.site.initialize().await;

        assert!(h.site.is_authenticated());
    }

    #[tokio::test]
    async fn initialize_with_unreachable_backends_clears_loading() {
        let h = harness();
        h.remote.set_offline(true);
        h.auth.set_offline(true);

        h.site.initialize().await;

        assert!(!h.site.is_loading());
        assert_eq!(h.site.snapshot().await, default_bundle());
        assert_eq!(h.site.auth_state(), AuthState::Anonymous);
    }

    #[tokio::test(start_paused = true)]
    async fn initialize_gives_up_after_timeout() {
        let mut auth = MockAuth::new();
        auth.expect_current_session().returning(|| Ok(None));

        struct Hanging;
        #[async_trait]
        impl RemoteStore for Hanging {
            async fn select_all(
                &self,
                _category: ContentCategory,
                _order: Option<crate::content::domain::entities::SortOrder>,
            ) -> Result<Vec<serde_json::Value>, RemoteStoreError> {
                std::future::pending().await
            }
            async fn select_by_id(
                &self,
                _category: ContentCategory,
                _id: &str,
            ) -> Result<Option<serde_json::Value>, RemoteStoreError> {
                std::future::pending().await
            }
            async fn upsert(
                &self,
                _category: ContentCategory,
                _record: serde_json::Value,
            ) -> Result<(), RemoteStoreError> {
                Ok(())
            }
            async fn delete(&self, _category: ContentCategory, _id: &str) -> Result<(), RemoteStoreError> {
                Ok(())
            }
            async fn delete_except(
                &self,
                _category: ContentCategory,
                _keep_id: &str,
            ) -> Result<(), RemoteStoreError> {
                Ok(())
            }
        }

        let remote: Arc<dyn RemoteStore> = Arc::new(Hanging);
        let cache = ContentCache::new(
            remote.clone(),
            Arc::new(MemoryStorage::new()),
            CacheSettings::default(),
        );
        let site = SiteContext::new(cache, remote, Arc::new(auth), Duration::from_secs(2));

        site.initialize().await;

        assert!(!site.is_loading());
        assert_eq!(site.profile().await, default_profile());
    }

    #[tokio::test]
    async fn refresh_bypasses_fresh_cache() {
        let h = harness();
        seed_remote(&h.remote, &remote_bundle()).await;
        h.site.initialize().await;

        h.remote
            .upsert(
                ContentCategory::Projects,
                serde_json::to_value(project("p-late", "Late project")).unwrap(),
            )
            .await
            .unwrap();
        h.site.refresh_data().await;

        assert!(h.site.projects().await.iter().any(|p| p.id == "p-late"));
    }

    #[tokio::test]
    async fn refresh_leaves_initial_loading_flag_alone() {
        let h = harness();
        seed_remote(&h.remote, &remote_bundle()).await;

        h.site.refresh_data().await;

        assert!(h.site.is_loading());
        assert_eq!(h.site.posts().await, remote_bundle().posts);
    }

    // ──────────────────────────────────────────────────────────
    // Save / delete / add
    // ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn save_upserts_and_invalidates() {
        let h = harness();
        h.site.initialize().await;
        assert!(h.site.cache().cached_entry().await.is_some());

        h.site
            .save_data(project("p1", "X").into())
            .await
            .unwrap();

        assert_eq!(h.remote.rows(ContentCategory::Projects).await.len(), 1);
        assert!(h.site.cache().cached_entry().await.is_none());
        // list state is the caller's business
        assert!(h.site.projects().await.iter().all(|p| p.id != "p1"));
    }

    #[tokio::test]
    async fn save_profile_patches_memory() {
        let h = harness();
        let mut profile = default_profile();
        profile.name = "Renamed".to_string();

        h.site.save_data(profile.clone().into()).await.unwrap();

        assert_eq!(h.site.profile().await, profile);
        let row = h
            .remote
            .select_by_id(ContentCategory::Profile, PROFILE_ID)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row["name"], "Renamed");
    }

    #[tokio::test]
    async fn save_profile_always_targets_the_singleton_row() {
        let h = harness();
        let mut profile = default_profile();
        profile.id = "not-the-singleton".to_string();
        profile.name = "Renamed".to_string();

        let saved = h.site.save_data(profile.into()).await.unwrap();

        assert_eq!(saved.id(), PROFILE_ID);
        let rows = h.remote.rows(ContentCategory::Profile).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], PROFILE_ID);
        assert_eq!(h.site.profile().await.id, PROFILE_ID);
        assert_eq!(h.site.cache().get_all_data(false).await.profile.name, "Renamed");
    }

    #[tokio::test]
    async fn save_failure_propagates_and_keeps_cache() {
        let h = harness();
        h.site.initialize().await;
        h.remote.set_rejecting_writes(true);

        let err = h
            .site
            .save_data(project("p1", "X").into())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SaveError::Remote(RemoteStoreError::Rejected { status: 403, .. })
        ));
        assert!(h.site.cache().cached_entry().await.is_some());
    }

    #[tokio::test]
    async fn delete_removes_after_remote_success() {
        let h = harness();
        seed_remote(&h.remote, &remote_bundle()).await;
        h.site.initialize().await;
        let target = h.site.posts().await[0].id.clone();

        h.site
            .delete_record(ContentCategory::Posts, &target)
            .await
            .unwrap();

        assert!(h.site.posts().await.iter().all(|p| p.id != target));
        assert!(h.site.cache().cached_entry().await.is_none());
    }

    #[tokio::test]
    async fn delete_failure_leaves_state_untouched() {
        let h = harness();
        seed_remote(&h.remote, &remote_bundle()).await;
        h.site.initialize().await;
        let before = h.site.posts().await;
        h.remote.set_offline(true);

        let result = h.site.delete_record(ContentCategory::Posts, &before[0].id).await;

        assert!(matches!(result, Err(SaveError::Remote(RemoteStoreError::Network(_)))));
        assert_eq!(h.site.posts().await, before);
    }

    #[tokio::test]
    async fn profile_cannot_be_deleted_or_created() {
        let h = harness();

        assert_eq!(
            h.site.delete_record(ContentCategory::Profile, PROFILE_ID).await,
            Err(SaveError::SingletonCategory(ContentCategory::Profile))
        );
        assert_eq!(
            h.site.add_new(ContentCategory::Profile).await,
            Err(SaveError::SingletonCategory(ContentCategory::Profile))
        );
    }

    #[tokio::test]
    async fn add_new_post_is_dated_today_and_first() {
        let h = harness();
        h.site.set_posts(default_posts()).await;

        let record = h.site.add_new(ContentCategory::Posts).await.unwrap();

        let ContentRecord::Post(post) = record else {
            panic!("expected a post stub");
        };
        assert_eq!(post.title, "Untitled Post");
        assert_eq!(post.date, "Sat Oct 12 2024");
        assert_eq!(h.site.posts().await[0].id, post.id);
        assert!(h.remote.rows(ContentCategory::Posts).await.is_empty());
    }

    #[tokio::test]
    async fn add_new_tool_section_goes_last() {
        let h = harness();
        h.site.initialize().await;

        let record = h.site.add_new(ContentCategory::ToolSections).await.unwrap();

        let sections = h.site.tool_sections().await;
        assert_eq!(sections.last().unwrap().id, record.id());
    }

    #[tokio::test]
    async fn seed_defaults_writes_everything_with_fresh_ids() {
        let h = harness();

        h.site.seed_defaults().await.unwrap();

        let defaults = default_bundle();
        let rows = h.remote.rows(ContentCategory::Posts).await;
        assert_eq!(rows.len(), defaults.posts.len());
        assert!(rows
            .iter()
            .all(|r| defaults.posts.iter().all(|p| r["id"] != p.id.as_str())));
        assert_eq!(
            h.remote.rows(ContentCategory::Photos).await.len(),
            defaults.photos.len()
        );
        assert_eq!(h.site.profile().await, defaults.profile);
        assert_eq!(h.site.posts().await.len(), defaults.posts.len());
    }

    #[tokio::test]
    async fn seed_defaults_removes_stray_profile_rows() {
        let h = harness();
        h.remote
            .upsert(
                ContentCategory::Profile,
                serde_json::json!({ "id": "stray", "name": "Old copy" }),
            )
            .await
            .unwrap();

        h.site.seed_defaults().await.unwrap();

        let rows = h.remote.rows(ContentCategory::Profile).await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["id"], PROFILE_ID);
    }

    #[tokio::test]
    async fn seed_defaults_stops_when_cleanup_fails() {
        let h = harness();
        h.remote.set_rejecting_writes(true);

        let err = h.site.seed_defaults().await.unwrap_err();

        assert!(matches!(
            err,
            SaveError::Remote(RemoteStoreError::Rejected { status: 403, .. })
        ));
        h.remote.set_rejecting_writes(false);
        assert!(h.remote.rows(ContentCategory::Posts).await.is_empty());
    }

    // ──────────────────────────────────────────────────────────
    // Auth
    // ──────────────────────────────────────────────────────────

    #[tokio::test]
    async fn sign_in_and_logout_drive_the_state_machine() {
        let h = harness();
        h.site.initialize().await;
        assert_eq!(h.site.require_admin(), Err(AccessError::NotAuthenticated));

        h.site
            .sign_in(&Credentials::new(ADMIN_EMAIL, ADMIN_PASSWORD))
            .await
            .unwrap();
        assert_eq!(h.site.auth_state(), AuthState::Authenticated);
        assert!(h.site.require_admin().is_ok());

        h.site.logout().await;
        assert_eq!(h.site.auth_state(), AuthState::Anonymous);
        assert!(h.site.cache().cached_entry().await.is_none());
    }

    #[tokio::test]
    async fn wrong_password_stays_anonymous() {
        let h = harness();

        let err = h
            .site
            .sign_in(&Credentials::new(ADMIN_EMAIL, "nope"))
            .await
            .unwrap_err();

        assert_eq!(err, AuthError::InvalidCredentials);
        assert!(!h.site.is_authenticated());
    }

    #[tokio::test]
    async fn logout_still_clears_state_when_provider_fails() {
        let h = harness();
        h.site
            .sign_in(&Credentials::new(ADMIN_EMAIL, ADMIN_PASSWORD))
            .await
            .unwrap();
        h.auth.set_offline(true);

        h.site.logout().await;

        assert!(!h.site.is_authenticated());
    }

    #[tokio::test]
    async fn password_reset_requires_email_then_always_succeeds() {
        let h = harness();

        assert_eq!(
            h.site.request_password_reset("   ").await,
            Err(AuthError::MissingEmail)
        );
        assert_eq!(
            AuthError::MissingEmail.to_string(),
            "Enter your email first to receive a reset link."
        );

        h.site.request_password_reset(ADMIN_EMAIL).await.unwrap();
        assert_eq!(h.auth.reset_requests().await, vec![ADMIN_EMAIL.to_string()]);

        h.auth.set_offline(true);
        assert!(h.site.request_password_reset("who@example.com").await.is_ok());
    }

    #[tokio::test]
    async fn watcher_follows_provider_side_termination() {
        let h = harness();
        let watcher = h.site.watch_auth();
        h.site
            .sign_in(&Credentials::new(ADMIN_EMAIL, ADMIN_PASSWORD))
            .await
            .unwrap();
        assert!(h.site.is_authenticated());

        h.auth.terminate_session().await;
        for _ in 0..50 {
            if !h.site.is_authenticated() {
                break;
            }
            tokio::task::yield_now().await;
        }

        assert_eq!(h.site.auth_state(), AuthState::Anonymous);
        watcher.abort();
    }

    #[tokio::test]
    async fn watcher_stops_when_context_dropped() {
        let h = harness();
        let watcher = h.site.watch_auth();
        let auth = h.auth.clone();
        drop(h);

        auth.terminate_session().await;
        watcher.await.unwrap();
    }

    #[tokio::test]
    async fn setters_only_touch_memory() {
        let h = harness();

        h.site.set_projects(vec![project("p9", "Local")]).await;
        h.site.update_record(project("p9", "Edited").into()).await;

        assert_eq!(h.site.projects().await[0].name, "Edited");
        assert!(h.remote.rows(ContentCategory::Projects).await.is_empty());
        assert!(h.storage.get("portfolio_cache_v1").await.unwrap().is_none());
    }
}
