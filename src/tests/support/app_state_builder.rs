use std::sync::Arc;
use std::time::Duration;

use actix_web::web;

use crate::auth::adapter::outgoing::memory_auth::InMemoryAuth;
use crate::auth::application::ports::outgoing::AuthProvider;
use crate::auth::domain::entities::Credentials;
use crate::content::adapter::outgoing::comrak_renderer::ComrakRenderer;
use crate::content::adapter::outgoing::memory_storage::MemoryStorage;
use crate::content::adapter::outgoing::memory_store::InMemoryRemoteStore;
use crate::content::application::ports::outgoing::MarkdownRenderer;
use crate::content::application::services::content_cache::{CacheSettings, ContentCache};
use crate::site::application::site_context::SiteContext;
use crate::AppState;

pub const TEST_ADMIN_EMAIL: &str = "admin@example.com";
pub const TEST_ADMIN_PASSWORD: &str = "correct horse battery staple";

/// Handles to the in-memory backends behind a test [`AppState`].
pub struct TestBackends {
    pub remote: Arc<InMemoryRemoteStore>,
    pub storage: Arc<MemoryStorage>,
    pub auth: Arc<InMemoryAuth>,
}

pub struct TestAppStateBuilder {
    remote: Arc<InMemoryRemoteStore>,
    storage: Arc<MemoryStorage>,
    auth: Arc<InMemoryAuth>,
    renderer: Arc<dyn MarkdownRenderer + Send + Sync>,
    signed_in: bool,
    initialized: bool,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            remote: Arc::new(InMemoryRemoteStore::new()),
            storage: Arc::new(MemoryStorage::new()),
            auth: Arc::new(
                InMemoryAuth::new().with_account(TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD),
            ),
            renderer: Arc::new(ComrakRenderer::default()),
            signed_in: false,
            initialized: true,
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_remote(mut self, remote: Arc<InMemoryRemoteStore>) -> Self {
        self.remote = remote;
        self
    }

    pub fn with_renderer(mut self, renderer: impl MarkdownRenderer + Send + Sync + 'static) -> Self {
        self.renderer = Arc::new(renderer);
        self
    }

    pub fn signed_in(mut self) -> Self {
        self.signed_in = true;
        self
    }

    /// Leave the context in its pre-initialization (loading) state.
    pub fn uninitialized(mut self) -> Self {
        self.initialized = false;
        self
    }

    pub fn backends(&self) -> TestBackends {
        TestBackends {
            remote: self.remote.clone(),
            storage: self.storage.clone(),
            auth: self.auth.clone(),
        }
    }

    pub async fn build(self) -> web::Data<AppState> {
        let cache = ContentCache::new(
            self.remote.clone(),
            self.storage.clone(),
            CacheSettings::default(),
        );
        let site = Arc::new(SiteContext::new(
            cache,
            self.remote.clone(),
            self.auth.clone(),
            Duration::from_secs(5),
        ));

        if self.signed_in {
            self.auth
                .sign_in(&Credentials::new(TEST_ADMIN_EMAIL, TEST_ADMIN_PASSWORD))
                .await
                .expect("test admin can sign in");
        }
        if self.initialized {
            site.initialize().await;
        } else {
            site.sync_session().await;
        }

        web::Data::new(AppState {
            site,
            renderer: self.renderer,
        })
    }
}
