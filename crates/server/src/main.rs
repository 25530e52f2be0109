//! Yatube server entry point.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use fred::interfaces::ClientLike;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yatube_api::{middleware::AppState, router};
use yatube_common::{
    Config,
    config::CacheBackend,
    page_cache::{MemoryPageStore, PageCache, PageStore, RedisPageStore},
};
use yatube_core::{CommentService, FollowService, GroupService, PostService, UserService};
use yatube_db::repositories::{
    CommentRepository, FollowRepository, GroupRepository, PostRepository, UserRepository,
};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

/// Build the page-cache store selected by the configuration.
async fn init_page_store(config: &Config) -> anyhow::Result<Arc<dyn PageStore>> {
    match config.cache.backend {
        CacheBackend::Memory => {
            info!("Using in-process page cache");
            Ok(Arc::new(MemoryPageStore::new()))
        }
        CacheBackend::Redis => {
            let redis = config
                .redis
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("cache.backend = redis requires [redis] config"))?;

            let fred_config = fred::types::config::Config::from_url(&redis.url)?;
            let client = fred::clients::Client::new(fred_config, None, None, None);
            client.connect();
            client.wait_for_connect().await?;
            info!("Connected to Redis page cache");

            Ok(Arc::new(RedisPageStore::new(
                Arc::new(client),
                redis.prefix.clone(),
            )))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yatube=debug,tower_http=debug".into()),
        )
        .init();

    info!("Starting yatube server...");

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    // Connect to database
    let db = yatube_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    yatube_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize page cache
    let page_store = init_page_store(&config).await?;
    let page_cache = PageCache::new(page_store, Duration::from_secs(config.cache.ttl_secs));

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let group_repo = GroupRepository::new(Arc::clone(&db));
    let post_repo = PostRepository::new(Arc::clone(&db));
    let comment_repo = CommentRepository::new(Arc::clone(&db));
    let follow_repo = FollowRepository::new(Arc::clone(&db));

    // Initialize services
    let user_service = UserService::new(user_repo.clone());
    let post_service = PostService::new(
        post_repo.clone(),
        user_repo.clone(),
        group_repo.clone(),
        follow_repo.clone(),
        comment_repo.clone(),
        config.feed.page_size,
    );
    let group_service = GroupService::new(group_repo);
    let comment_service = CommentService::new(comment_repo, post_repo);
    let follow_service = FollowService::new(follow_repo, user_repo);

    // Create app state
    let state = AppState {
        user_service,
        post_service,
        group_service,
        comment_service,
        follow_service,
        page_cache,
    };

    // Build router
    let app = router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
