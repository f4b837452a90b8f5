use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::account::service::AccountService;
use account_service::domain::authentication::service::AuthService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountRepository;
use account_service::outbound::repositories::PostgresAccountRepository;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::SystemClock;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_minutes = config.jwt.expiration_minutes,
        persistent = config.database.url.is_some(),
        "Configuration loaded"
    );

    let password_hasher = PasswordHasher::with_cost(config.password)?;
    let authenticator = Arc::new(
        Authenticator::new(config.jwt.secret.as_bytes())
            .with_password_hasher(password_hasher)
            .with_token_ttl(Duration::minutes(config.jwt.expiration_minutes)),
    );
    let clock = Arc::new(SystemClock);

    let http_application = match &config.database.url {
        Some(database_url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            tracing::info!(
                max_connections = 5,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool));
            create_router(
                Arc::new(AccountService::new(
                    Arc::clone(&account_repository),
                    Arc::clone(&authenticator),
                )),
                Arc::new(AuthService::new(account_repository, authenticator, clock)?),
            )
        }
        None => {
            tracing::warn!("No database url configured, accounts are kept in memory");

            let account_repository = Arc::new(InMemoryAccountRepository::new());
            create_router(
                Arc::new(AccountService::new(
                    Arc::clone(&account_repository),
                    Arc::clone(&authenticator),
                )),
                Arc::new(AuthService::new(account_repository, authenticator, clock)?),
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

    axum::serve(http_listener, http_application).await?;

    Ok(())
}
