use anyhow::{Context, Result};
use blog_core::application::{
    ports::{session::SessionStore, time::Clock, util::SlugGenerator},
    seed,
    services::ApplicationServices,
};
use blog_core::config::{AppConfig, SlugStrategy, StorageBackend};
use blog_core::domain::article::{ArticleReadRepository, ArticleWriteRepository};
use blog_core::infrastructure::{
    database,
    repositories::{InMemoryArticleRepository, MySqlArticleRepository, PostgresArticleRepository},
    security::session_store::InMemorySessionStore,
    time::SystemClock,
    util::{NaiveSlugGenerator, SanitizingSlugGenerator},
};
use blog_core::presentation::http::{
    middleware::{auth::AccessPolicy, cache::ResponseCache},
    routes::{RouterOptions, build_router},
    state::HttpState,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type Repositories = (Arc<dyn ArticleWriteRepository>, Arc<dyn ArticleReadRepository>);

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err:#}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let (article_write_repo, article_read_repo) = build_repositories(&config).await?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = match config.slug_strategy() {
        SlugStrategy::Naive => Arc::new(NaiveSlugGenerator),
        SlugStrategy::Sanitized => Arc::new(SanitizingSlugGenerator),
    };
    let session_ttl = chrono::Duration::from_std(config.session_ttl())
        .context("SESSION_TTL_SECONDS is out of range")?;
    let session_store: Arc<dyn SessionStore> =
        Arc::new(InMemorySessionStore::new(session_ttl, Arc::clone(&clock)));

    let services = Arc::new(ApplicationServices::new(
        article_write_repo,
        article_read_repo,
        session_store,
        clock,
        slugger,
    ));

    if let Some(dir) = config.seed_dir() {
        seed::import_directory(&services.article_commands, dir)
            .await
            .with_context(|| format!("seeding articles from {}", dir.display()))?;
    }

    if config.api_keys().is_empty() {
        tracing::warn!("API_KEYS is empty; every /api request will be rejected");
    }

    let state = HttpState {
        services,
        access: Arc::new(AccessPolicy::new(
            config.api_keys().iter().cloned(),
            config.api_key_header().clone(),
            config.session_cookie_name(),
            config.session_ttl(),
        )),
        cache: Arc::new(ResponseCache::new(config.cache_ttl())),
    };
    let options = RouterOptions {
        assets_dir: config.assets_dir().to_path_buf(),
        allowed_origins: config.allowed_origins().to_vec(),
        api_key_header: config.api_key_header().clone(),
    };

    let app = build_router(state, &options);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!(storage = ?config.storage(), "listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn build_repositories(config: &AppConfig) -> Result<Repositories> {
    match config.storage() {
        StorageBackend::Memory => Ok(split(Arc::new(InMemoryArticleRepository::new()))),
        StorageBackend::Postgres => {
            let url = config.database_url().context("DATABASE_URL is not set")?;
            let pool = database::init_pg_pool(url).await?;
            database::run_pg_migrations(&pool).await?;
            Ok(split(Arc::new(PostgresArticleRepository::new(pool))))
        }
        StorageBackend::MySql => {
            let url = config.database_url().context("DATABASE_URL is not set")?;
            let pool = database::init_mysql_pool(url).await?;
            database::run_mysql_migrations(&pool).await?;
            Ok(split(Arc::new(MySqlArticleRepository::new(pool))))
        }
    }
}

fn split<R>(repo: Arc<R>) -> Repositories
where
    R: ArticleWriteRepository + ArticleReadRepository + 'static,
{
    let write: Arc<dyn ArticleWriteRepository> = repo.clone();
    let read: Arc<dyn ArticleReadRepository> = repo;
    (write, read)
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
