use std::sync::Arc;

use auth::Authenticator;
use auth::CredentialExtractor;
use chirpy::config::Config;
use chirpy::domain::chirp::service::ChirpService;
use chirpy::domain::session::models::AccessTokenLifetime;
use chirpy::domain::session::service::SessionService;
use chirpy::domain::user::service::UserService;
use chirpy::inbound::http::router::create_router;
use chirpy::outbound::repositories::PostgresChirpRepository;
use chirpy::outbound::repositories::PostgresRefreshTokenRepository;
use chirpy::outbound::repositories::PostgresUserRepository;
use chrono::Duration;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chirpy=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "chirpy",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        access_token_max_seconds = config.auth.access_token_max_seconds,
        refresh_token_days = config.auth.refresh_token_days,
        strict_authorization_scheme = config.auth.strict_authorization_scheme,
        "Configuration loaded"
    );

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

    let credentials = if config.auth.strict_authorization_scheme {
        CredentialExtractor::strict()
    } else {
        CredentialExtractor::lenient()
    };
    let authenticator = Arc::new(
        Authenticator::new(config.auth.jwt_secret.as_bytes())
            .with_credential_extractor(credentials),
    );

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let chirp_repository = Arc::new(PostgresChirpRepository::new(pg_pool.clone()));
    let refresh_token_repository = Arc::new(PostgresRefreshTokenRepository::new(pg_pool));

    let user_service = Arc::new(UserService::new(Arc::clone(&user_repository)));
    let chirp_service = Arc::new(ChirpService::new(chirp_repository));
    let session_service = Arc::new(SessionService::new(
        user_repository,
        refresh_token_repository,
        Arc::clone(&authenticator),
        AccessTokenLifetime::new(config.auth.access_token_max_seconds),
        Duration::days(config.auth.refresh_token_days),
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
        user_service,
        chirp_service,
        session_service,
        authenticator,
        &config.polka.api_key,
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
