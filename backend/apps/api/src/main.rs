//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use accounts::domain::mailer::VerificationMailer;
use accounts::{AccountsConfig, LogMailer, PgAccountsRepository, SmtpConfig, SmtpMailer};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
};
use base64::Engine;
use base64::engine::general_purpose;
use habits::PgHabitRepository;
use habits::presentation::router::habits_router_generic;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,accounts=info,habits=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Session configuration
    let config = if cfg!(debug_assertions) {
        AccountsConfig::development()
    } else {
        // In production, load secret from environment
        let secret_b64 =
            env::var("SESSION_SECRET").expect("SESSION_SECRET must be set in production");
        let secret_bytes = Engine::decode(&general_purpose::STANDARD, &secret_b64)?;
        let secret: [u8; 32] = secret_bytes
            .as_slice()
            .try_into()
            .map_err(|_| anyhow::anyhow!("SESSION_SECRET must decode to 32 bytes"))?;
        AccountsConfig {
            session_secret: secret,
            ..AccountsConfig::default()
        }
    };

    let accounts_repo = PgAccountsRepository::new(pool.clone());
    let habit_repo = PgHabitRepository::new(pool.clone());

    // Mailer: SMTP when configured, log-only otherwise
    let app = match smtp_config_from_env() {
        Some(smtp) => {
            let mailer = SmtpMailer::new(&smtp)?;
            build_router(accounts_repo, habit_repo, mailer, config)
        }
        None => {
            tracing::warn!("SMTP_HOST not set, verification codes are logged instead of emailed");
            build_router(accounts_repo, habit_repo, LogMailer, config)
        }
    };

    // CORS configuration
    let frontend_origins =
        env::var("FRONTEND_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE]))
        .allow_credentials(true);

    let app = app.layer(TraceLayer::new_for_http()).layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], 5000));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Assemble the full router: open account routes plus the gated habit routes.
fn build_router<M>(
    accounts_repo: PgAccountsRepository,
    habit_repo: PgHabitRepository,
    mailer: M,
    config: AccountsConfig,
) -> Router
where
    M: VerificationMailer + Send + Sync + 'static,
{
    let gate = accounts::router::session_gate(
        Arc::new(accounts_repo.clone()),
        Arc::new(config.clone()),
    );

    let gated_habits = habits_router_generic(habit_repo.clone()).layer(
        middleware::from_fn_with_state(
            gate,
            accounts::middleware::require_session::<PgAccountsRepository>,
        ),
    );

    accounts::router::accounts_router_generic(accounts_repo, habit_repo, mailer, config)
        .merge(gated_habits)
}

fn smtp_config_from_env() -> Option<SmtpConfig> {
    let host = env::var("SMTP_HOST").ok()?;

    Some(SmtpConfig {
        host,
        port: env::var("SMTP_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(587),
        username: env::var("SMTP_USERNAME").unwrap_or_default(),
        password: env::var("SMTP_PASSWORD").unwrap_or_default(),
        from_address: env::var("SMTP_FROM").unwrap_or_else(|_| "no-reply@localhost".to_string()),
    })
}
