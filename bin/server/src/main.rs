use folio_access::IdentityProvider;
use folio_server::{
    AppState, ServerConfig,
    db::{AdminUserRepository, ContentRepository},
    discord::DiscordOAuthClient,
    router,
};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration from environment
    let config = ServerConfig::from_env().expect("failed to load configuration");
    tracing::info!("Loaded configuration");

    let db_pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("failed to run migrations");

    let identity: Option<Arc<dyn IdentityProvider>> =
        match DiscordOAuthClient::from_config(&config.discord)
            .expect("invalid discord configuration")
        {
            Some(client) => Some(Arc::new(client)),
            None => {
                tracing::warn!("Discord credentials not configured; logins will fail");
                None
            }
        };

    let state = AppState::new(
        Arc::new(AdminUserRepository::new(db_pool.clone())),
        Arc::new(ContentRepository::new(db_pool)),
        identity,
    );

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("failed to bind to address");

    tracing::info!("listening on http://{}", config.bind_addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
