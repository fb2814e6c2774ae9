//! Lab Lending server binary.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use lab_lending::adapters::http::{router, AppState, RouterSettings, SessionSettings};
use lab_lending::adapters::postgres::{
    PostgresCatalogRepository, PostgresCredentialStore, PostgresLendingStore,
};
use lab_lending::adapters::{BcryptHasher, InMemoryDatabase, InMemorySessionStore};
use lab_lending::config::AppConfig;
use lab_lending::ports::SessionStore;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!(error = %e, "server exited with error");
        eprintln!("lab-lending: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let sessions = Arc::new(InMemorySessionStore::new());
    let state = build_state(&config, sessions.clone()).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let sweeper = InMemorySessionStore::spawn_sweeper(
        sessions as Arc<dyn SessionStore>,
        config.auth.sweep_interval(),
        shutdown_rx,
    );

    let app = router(
        state,
        &RouterSettings {
            cors_origins: config.server.cors_origins_list(),
            request_timeout: config.server.request_timeout(),
        },
    );

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "lab-lending listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = shutdown_tx.send(true);
    if let Err(e) = sweeper.await {
        error!(error = %e, "session sweeper panicked");
    }
    info!("server shutdown complete");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.server.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn build_state(
    config: &AppConfig,
    sessions: Arc<InMemorySessionStore>,
) -> Result<AppState, Box<dyn std::error::Error>> {
    let session = SessionSettings {
        ttl: config.auth.session_ttl(),
        cookie_name: config.auth.cookie_name.clone(),
        secure_cookie: config.auth.secure_cookie,
        allow_fallback_token: config.auth.allow_fallback_token,
    };
    let hasher = Arc::new(BcryptHasher::new(config.auth.bcrypt_cost));

    if config.database.is_memory() {
        info!("using in-memory storage; data is lost on restart");
        let db = Arc::new(InMemoryDatabase::new());
        return Ok(AppState {
            lending: db.clone(),
            catalog: db.clone(),
            attachments: db.clone(),
            credentials: db,
            sessions,
            hasher,
            session,
        });
    }

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("database migrations applied");
    }

    let catalog = Arc::new(PostgresCatalogRepository::new(pool.clone()));
    Ok(AppState {
        lending: Arc::new(PostgresLendingStore::new(pool.clone())),
        catalog: catalog.clone(),
        attachments: catalog,
        credentials: Arc::new(PostgresCredentialStore::new(pool)),
        sessions,
        hasher,
        session,
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
