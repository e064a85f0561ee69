use std::sync::Arc;

use auth::Authenticator;
use post_service::config::Config;
use post_service::domain::account::service::AccountService;
use post_service::domain::ports::Repository;
use post_service::domain::post::service::PostService;
use post_service::inbound::http::router::create_router;
use post_service::inbound::websocket::ConnectionRegistry;
use post_service::outbound::events::WebsocketNotifier;
use post_service::outbound::repositories::InMemoryRepository;
use post_service::outbound::repositories::PostgresRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "post_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "post-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        jwt_expiration_hours = config.jwt.expiration_hours,
        page_size = config.pagination.page_size,
        in_memory = config.uses_memory_backend(),
        "Configuration loaded"
    );

    if config.uses_memory_backend() {
        tracing::info!(database = "memory", "Using in-memory repository");
        serve(&config, Arc::new(InMemoryRepository::new())).await
    } else {
        let pg_pool = PgPoolOptions::new()
            .max_connections(config.database.max_connections)
            .connect(&config.database.url)
            .await?;
        tracing::info!(
            max_connections = config.database.max_connections,
            database = "postgresql",
            "Database connection pool created"
        );

        sqlx::migrate!("./migrations").run(&pg_pool).await?;
        tracing::info!(database = "postgresql", "Database migrations completed");

        serve(&config, Arc::new(PostgresRepository::new(pg_pool))).await
    }
}

/// Serve until Ctrl-C, then release the repository.
async fn serve<R: Repository>(config: &Config, repository: Arc<R>) -> Result<(), anyhow::Error> {
    let authenticator = Arc::new(Authenticator::with_settings(
        config.jwt.secret.as_bytes(),
        config.hash_cost(),
        config.jwt.expiration_hours,
    ));
    let connection_registry = Arc::new(ConnectionRegistry::new());
    let notifier = Arc::new(WebsocketNotifier::new(Arc::clone(&connection_registry)));

    let account_service = Arc::new(AccountService::new(
        Arc::clone(&repository),
        Arc::clone(&authenticator),
    ));
    let post_service = Arc::new(PostService::new(
        Arc::clone(&repository),
        notifier,
        config.pagination.page_size,
    ));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        account_service,
        post_service,
        authenticator,
        connection_registry,
    );

    let served = axum::serve(http_listener, http_application)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    if let Err(e) = repository.close().await {
        tracing::error!(error = %e, "Failed to close repository");
    }

    served?;
    tracing::info!("Server exited successfully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
