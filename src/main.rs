use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use deadpool_redis::{Config, Runtime};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portfolio_content::auth::adapter::outgoing::memory_auth::InMemoryAuth;
use portfolio_content::auth::adapter::outgoing::supabase_auth::SupabaseAuth;
use portfolio_content::auth::application::ports::outgoing::AuthProvider;
use portfolio_content::config::{AppConfig, CacheBackend, ContentBackend};
use portfolio_content::content::adapter::outgoing::comrak_renderer::ComrakRenderer;
use portfolio_content::content::adapter::outgoing::file_storage::FileStorage;
use portfolio_content::content::adapter::outgoing::memory_storage::MemoryStorage;
use portfolio_content::content::adapter::outgoing::memory_store::InMemoryRemoteStore;
use portfolio_content::content::adapter::outgoing::redis_storage::RedisStorage;
use portfolio_content::content::adapter::outgoing::supabase_rest_store::SupabaseRestStore;
use portfolio_content::content::application::ports::outgoing::{KeyValueStore, RemoteStore};
use portfolio_content::content::application::services::content_cache::ContentCache;
use portfolio_content::shared::supabase::SupabaseClient;
use portfolio_content::site::application::site_context::SiteContext;
use portfolio_content::{init_routes, AppState};

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    let config = AppConfig::from_env().context("Invalid configuration")?;
    let server_url = config.server_url();

    let (remote, auth): (Arc<dyn RemoteStore>, Arc<dyn AuthProvider>) =
        match (config.content_backend, config.supabase.as_ref()) {
            (ContentBackend::Supabase, Some(supabase)) => {
                let client = SupabaseClient::new(&supabase.url, supabase.anon_key.clone())
                    .context("Failed to create Supabase client")?;
                info!(url = %supabase.url, "Using Supabase content backend");
                (
                    Arc::new(SupabaseRestStore::new(client.clone())),
                    Arc::new(SupabaseAuth::new(client)),
                )
            }
            _ => {
                warn!("Using in-memory content backend; changes are lost on restart");
                let mut auth = InMemoryAuth::new();
                if let Some(admin) = &config.dev_admin {
                    auth = auth.with_account(&admin.email, &admin.password);
                }
                (Arc::new(InMemoryRemoteStore::new()), Arc::new(auth))
            }
        };

    let storage: Arc<dyn KeyValueStore> = match &config.cache_backend {
        CacheBackend::Memory => Arc::new(MemoryStorage::new()),
        CacheBackend::File { dir } => {
            info!(dir = %dir.display(), "Persisting content cache to disk");
            Arc::new(FileStorage::new(dir.clone()))
        }
        CacheBackend::Redis { url } => {
            let redis_pool = Config::from_url(url)
                .create_pool(Some(Runtime::Tokio1))
                .context("Failed to create Redis pool")?;
            Arc::new(RedisStorage::new(Arc::new(redis_pool)))
        }
    };

    let cache = ContentCache::new(remote.clone(), storage, config.cache.clone());
    let site = Arc::new(SiteContext::new(cache, remote, auth, config.init_timeout));
    let _auth_listener = site.watch_auth();

    let state = AppState {
        site: site.clone(),
        renderer: Arc::new(ComrakRenderer::default()),
    };

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(init_routes)
    })
    .bind(&server_url)?
    .run();

    info!("Server run on: {}", server_url);

    // /ready reports 503 until this finishes
    actix_web::rt::spawn(async move { site.initialize().await });

    server.await?;

    Ok(())
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
    }
}
