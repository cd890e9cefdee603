// src/modules/content/application/services/content_cache.rs

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::content::application::ports::outgoing::{
    Clock, KeyValueStore, RemoteStore, RemoteStoreError, SystemClock,
};
use crate::content::domain::defaults::{
    default_bundle, default_media, default_photos, default_posts, default_profile,
    default_projects, default_talks, default_tool_sections,
};
use crate::content::domain::entities::{
    ContentBundle, ContentCategory, MediaItem, Photo, Post, Profile, Project, Record, Talk,
    ToolSection, PROFILE_ID,
};

pub const DEFAULT_CACHE_KEY: &str = "portfolio_cache_v1";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub key: String,
    pub ttl: Duration,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            key: DEFAULT_CACHE_KEY.to_string(),
            ttl: DEFAULT_CACHE_TTL,
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Persisted entry
// ──────────────────────────────────────────────────────────
//

/// The single persisted cache entry: `{timestamp, data}`, timestamp in unix millis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedBundle {
    pub timestamp: i64,
    pub data: ContentBundle,
}

impl CachedBundle {
    pub fn new(stored_at: DateTime<Utc>, data: ContentBundle) -> Self {
        Self {
            timestamp: stored_at.timestamp_millis(),
            data,
        }
    }

    /// Fresh while `now - timestamp <= ttl`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let age_ms = now.timestamp_millis().saturating_sub(self.timestamp);
        let ttl_ms = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        age_ms <= ttl_ms
    }
}

/// Where the bundle returned by a read came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleOrigin {
    /// Fresh cache hit; a background refresh was started unless one was
    /// already running.
    Cache,
    /// Fetched from the remote store and persisted.
    Remote,
    /// Remote fetch failed; served the existing (possibly expired) entry.
    CachedFallback,
    /// Remote fetch failed with nothing cached; built-in defaults.
    Defaults,
}

impl BundleOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            BundleOrigin::Cache => "cache",
            BundleOrigin::Remote => "remote",
            BundleOrigin::CachedFallback => "cached_fallback",
            BundleOrigin::Defaults => "defaults",
        }
    }
}

#[derive(Debug)]
pub struct CacheRead {
    pub bundle: ContentBundle,
    pub origin: BundleOrigin,
    /// Handle of the detached refresh started by a fresh cache hit. `None`
    /// when another refresh was already in flight.
    pub background_refresh: Option<JoinHandle<()>>,
}

/// Clears the in-flight flag when the background refresh ends, aborted or not.
struct InFlight(Arc<AtomicBool>);

impl InFlight {
    fn claim(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag.clone()))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

//
// ──────────────────────────────────────────────────────────
// Service
// ──────────────────────────────────────────────────────────
//

/// Stale-while-revalidate read-through cache over the remote store.
///
/// Never fails: remote and storage errors degrade to the last persisted
/// bundle, then to the built-in defaults. Clones share one background
/// refresh slot, so concurrent fresh hits start at most one refresh.
#[derive(Clone)]
pub struct ContentCache {
    remote: Arc<dyn RemoteStore>,
    storage: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    settings: CacheSettings,
    refreshing: Arc<AtomicBool>,
}

impl ContentCache {
    pub fn new(
        remote: Arc<dyn RemoteStore>,
        storage: Arc<dyn KeyValueStore>,
        settings: CacheSettings,
    ) -> Self {
        Self::with_clock(remote, storage, Arc::new(SystemClock), settings)
    }

    pub fn with_clock(
        remote: Arc<dyn RemoteStore>,
        storage: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            remote,
            storage,
            clock,
            settings,
            refreshing: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn settings(&self) -> &CacheSettings {
        &self.settings
    }

    /// Content bundle for display. The background refresh, if any, is detached.
    pub async fn get_all_data(&self, force_refresh: bool) -> ContentBundle {
        self.read(force_refresh).await.bundle
    }

    /// Like [`get_all_data`](Self::get_all_data), also reporting the origin of
    /// the bundle and the handle of the background refresh.
    pub async fn read(&self, force_refresh: bool) -> CacheRead {
        if !force_refresh {
            if let Some(entry) = self.load_entry().await {
                if entry.is_fresh(self.clock.now(), self.settings.ttl) {
                    return CacheRead {
                        bundle: entry.data,
                        origin: BundleOrigin::Cache,
                        background_refresh: self.spawn_refresh(),
                    };
                }
                debug!("Cached content bundle expired; fetching synchronously");
            }
        }

        let (bundle, origin) = self.refresh().await;
        CacheRead {
            bundle,
            origin,
            background_refresh: None,
        }
    }

    /// Whether a background refresh is currently running.
    pub fn is_refreshing(&self) -> bool {
        self.refreshing.load(Ordering::Acquire)
    }

    fn spawn_refresh(&self) -> Option<JoinHandle<()>> {
        let Some(in_flight) = InFlight::claim(&self.refreshing) else {
            debug!("Serving cached content bundle; refresh already in flight");
            return None;
        };

        debug!("Serving cached content bundle; refreshing in background");
        let refresher = self.clone();
        Some(tokio::spawn(async move {
            let _in_flight = in_flight;
            refresher.fetch_and_cache().await;
        }))
    }

    /// Discard the persisted entry so the next read reconciles with the remote store.
    pub async fn invalidate_cache(&self) {
        match self.storage.remove(&self.settings.key).await {
            Ok(()) => debug!("Content cache invalidated"),
            Err(e) => warn!("Failed to invalidate content cache: {}", e),
        }
    }

    /// Fetch all categories, persist the result, and return it.
    pub async fn fetch_and_cache(&self) -> ContentBundle {
        self.refresh().await.0
    }

    /// The persisted entry regardless of age, if one is readable.
    pub async fn cached_entry(&self) -> Option<CachedBundle> {
        self.load_entry().await
    }

    async fn refresh(&self) -> (ContentBundle, BundleOrigin) {
        match self.fetch_remote().await {
            Ok(bundle) => {
                self.store(&bundle).await;
                (bundle, BundleOrigin::Remote)
            }
            Err(e) => {
                error!("Content fetch failed: {}", e);
                match self.load_entry().await {
                    Some(entry) => {
                        warn!("Falling back to previously cached content");
                        (entry.data, BundleOrigin::CachedFallback)
                    }
                    None => {
                        warn!("No cached content available; using built-in defaults");
                        (default_bundle(), BundleOrigin::Defaults)
                    }
                }
            }
        }
    }

    async fn fetch_remote(&self) -> Result<ContentBundle, RemoteStoreError> {
        let (profile, posts, projects, talks, media, photos, tool_sections) = tokio::try_join!(
            self.fetch_profile(),
            self.fetch_list::<Post>(),
            self.fetch_list::<Project>(),
            self.fetch_list::<Talk>(),
            self.fetch_list::<MediaItem>(),
            self.fetch_list::<Photo>(),
            self.fetch_list::<ToolSection>(),
        )?;

        info!(
            posts = posts.len(),
            projects = projects.len(),
            talks = talks.len(),
            "Fetched content from remote store"
        );

        Ok(ContentBundle {
            profile: profile.unwrap_or_else(default_profile),
            posts: non_empty_or(posts, default_posts),
            projects: non_empty_or(projects, default_projects),
            talks: non_empty_or(talks, default_talks),
            media: non_empty_or(media, default_media),
            photos: non_empty_or(photos, default_photos),
            tool_sections: non_empty_or(tool_sections, default_tool_sections),
        })
    }

    async fn fetch_profile(&self) -> Result<Option<Profile>, RemoteStoreError> {
        let row = self
            .remote
            .select_by_id(ContentCategory::Profile, PROFILE_ID)
            .await?;

        row.map(|value| {
            serde_json::from_value::<Profile>(value)
                .map_err(|e| RemoteStoreError::Malformed(format!("site_config: {e}")))
        })
        .transpose()
    }

    async fn fetch_list<T: Record>(&self) -> Result<Vec<T>, RemoteStoreError> {
        let category = T::CATEGORY;
        let rows = self
            .remote
            .select_all(category, category.order_hint())
            .await?;

        rows.into_iter()
            .map(|value| {
                serde_json::from_value::<T>(value)
                    .map_err(|e| RemoteStoreError::Malformed(format!("{category}: {e}")))
            })
            .collect()
    }

    async fn load_entry(&self) -> Option<CachedBundle> {
        let raw = match self.storage.get(&self.settings.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read content cache: {}", e);
                return None;
            }
        };

        match serde_json::from_str::<CachedBundle>(&raw) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Ignoring unreadable content cache entry: {}", e);
                None
            }
        }
    }

    async fn store(&self, bundle: &ContentBundle) {
        let entry = CachedBundle::new(self.clock.now(), bundle.clone());
        let raw = match serde_json::to_string(&entry) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize content cache entry: {}", e);
                return;
            }
        };

        if let Err(e) = self.storage.set(&self.settings.key, &raw).await {
            warn!("Failed to persist content cache: {}", e);
        }
    }
}

fn non_empty_or<T>(list: Vec<T>, fallback: fn() -> Vec<T>) -> Vec<T> {
    if list.is_empty() {
        fallback()
    } else {
        list
    }
}
