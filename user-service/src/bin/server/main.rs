use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use user_service::config::Config;
use user_service::domain::session::tokens::TokenService;
use user_service::domain::user::ports::UserServicePort;
use user_service::domain::user::service::Deadlines;
use user_service::domain::user::service::UserService;
use user_service::inbound::http::router::create_router;
use user_service::outbound::repositories::InMemoryUserRepository;
use user_service::outbound::repositories::PostgresUserRepository;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "user-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load().context("Failed to load configuration")?;

    tracing::info!(
        http_port = config.server.http_port,
        persistent = config.database.url.is_some(),
        access_token_hours = config.jwt.access_token_hours,
        refresh_token_hours = config.jwt.refresh_token_hours,
        read_deadline_secs = config.deadlines.read_secs,
        write_deadline_secs = config.deadlines.write_secs,
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes()));
    let tokens = Arc::new(TokenService::new(
        Arc::clone(&authenticator),
        config.jwt.access_token_hours,
        config.jwt.refresh_token_hours,
    ));
    tokens
        .self_check()
        .context("Token signing self-check failed")?;

    let deadlines = Deadlines::from(&config.deadlines);

    let user_service: Arc<dyn UserServicePort> = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let repository = Arc::new(PostgresUserRepository::new(pg_pool));
            Arc::new(
                UserService::new(repository, Arc::clone(&authenticator), Arc::clone(&tokens))
                    .with_deadlines(deadlines),
            )
        }
        None => {
            tracing::warn!("No database url configured; users are kept in memory");
            let repository = Arc::new(InMemoryUserRepository::new());
            Arc::new(
                UserService::new(repository, Arc::clone(&authenticator), Arc::clone(&tokens))
                    .with_deadlines(deadlines),
            )
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, tokens);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");
    Ok(())
}
