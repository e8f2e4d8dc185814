use academy_portal::{
    AppState,
    config::{AppConfig, Env},
    create_router,
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Loads configuration, initializes logging, wires the application state and serves HTTP.
#[tokio::main]
async fn main() {
    // 1. Configuration (fail-fast in production)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging filter: RUST_LOG wins, otherwise verbose for this crate.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "academy_portal=debug,tower_http=info".into());

    // 3. Log format by environment: pretty locally, JSON for aggregators in production.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);
    tracing::info!(path = %config.session_file.display(), "Session file");

    // 4. State and router
    let app = create_router(AppState::from_config(&config));

    // 5. Server
    let listener = match TcpListener::bind(&config.bind_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("FATAL: failed to bind {}: {}", config.bind_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Listening on {}", config.bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at /swagger-ui");

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
