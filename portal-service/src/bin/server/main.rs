use std::sync::Arc;

use auth::Authenticator;
use auth::CredentialStore;
use auth::RequestAuthenticator;
use auth::TokenIssuer;
use auth::TokenValidator;
use portal_service::config::Config;
use portal_service::inbound::http::router::create_router;
use portal_service::inbound::http::router::CookieSettings;
use portal_service::outbound::repositories::InMemoryCredentialStore;
use portal_service::outbound::repositories::PostgresCredentialStore;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal_service=debug,auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "portal-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        token_ttl_seconds = config.jwt.ttl_seconds,
        cookie_name = %config.jwt.cookie_name,
        exempt_prefixes = ?config.exemptions.prefixes,
        exempt_paths = ?config.exemptions.exact,
        "Configuration loaded"
    );

    match config.database.url.clone() {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&url)
                .await?;
            tracing::info!(
                max_connections = 5,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let store = PostgresCredentialStore::new(pg_pool);
            match store.check_connection().await {
                Ok(()) => tracing::info!(database = "postgresql", "Database is reachable"),
                Err(e) => tracing::error!(error = %e, "Database connection check failed"),
            }

            serve(&config, Arc::new(store)).await
        }
        None => {
            tracing::warn!("No database configured, using in-memory credential store");
            serve(&config, Arc::new(InMemoryCredentialStore::new())).await
        }
    }
}

async fn serve<S>(config: &Config, store: Arc<S>) -> Result<(), anyhow::Error>
where
    S: CredentialStore,
{
    // Built once; never mutated afterwards.
    let secret = config.signing_secret()?;
    let issuer = TokenIssuer::new(&secret, config.token_ttl());
    let validator = Arc::new(TokenValidator::new(&secret));

    let authenticator = Arc::new(Authenticator::new(store, issuer)?);
    let request_authenticator = Arc::new(RequestAuthenticator::new(
        config.exemption_policy(),
        validator,
    ));
    let cookie = CookieSettings {
        name: config.jwt.cookie_name.clone(),
        secure: config.jwt.secure_cookie,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(authenticator, request_authenticator, cookie);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");
    Ok(())
}
