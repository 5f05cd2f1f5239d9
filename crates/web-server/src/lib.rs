use axum::{
    routing::{get, post, put},
    Router,
};
use cache::{CacheStore, MemoryCache, NoopCache};
use configuration::Config;
use database::PgPool;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;
pub mod responses;

/// The shared application state that all handlers can access.
///
/// The pool bounds concurrent unit-of-work scopes; each handler checks a
/// scope out per request and returns the connection on scope exit. The
/// cache store is shared freely — entries are immutable once written.
pub struct AppState {
    pub pool: PgPool,
    pub cache: Arc<dyn CacheStore>,
    pub cache_ttl: Duration,
}

/// The main function to configure and run the web server.
pub async fn run_server(addr: SocketAddr, config: Config) -> anyhow::Result<()> {
    // Tracing is initialized by the binary; here we only wire the layers.
    dotenvy::dotenv().ok();
    let pool = database::connect(&config.database).await?;
    database::run_migrations(&pool).await?;

    let cache: Arc<dyn CacheStore> = if config.cache.enabled {
        Arc::new(MemoryCache::new())
    } else {
        Arc::new(NoopCache::new())
    };

    let app_state = Arc::new(AppState {
        pool,
        cache,
        cache_ttl: Duration::from_secs(config.cache.ttl_secs),
    });

    let app = router(app_state);

    tracing::info!("Web server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the application router. Split out of `run_server` so tests can
/// mount the routes without binding a socket.
pub fn router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/classes", post(handlers::create_class))
        .route("/api/classes/list", get(handlers::read_class_list))
        .route("/api/classes/:class_id", get(handlers::read_class))
        .route(
            "/api/classes/:class_id/notices",
            post(handlers::create_class_notice),
        )
        .route(
            "/api/classes/:class_id/notices/list",
            get(handlers::read_class_notice_list),
        )
        .route(
            "/api/classes/:class_id/notices/:notice_id",
            put(handlers::update_class_notice).delete(handlers::delete_class_notice),
        )
        .with_state(app_state)
        .layer(cors)
        // This middleware will automatically log information about every incoming request.
        .layer(TraceLayer::new_for_http())
}
