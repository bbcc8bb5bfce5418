use library_gate::{
    AppState,
    config::{AppConfig, Env},
    create_router,
};
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// Entry point of the gate host: configuration, logging, the navigation gate, then the HTTP
/// server.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (Fail-Fast)
    // Loads .env file settings before configuration can be read.
    dotenv::dotenv().ok();
    // AppConfig::load() panics on a missing production origin or an unparsable redirect limit.
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // RUST_LOG wins, otherwise verbose gate logs for local work.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "library_gate=debug,tower_http=info".into());

    // 3. Initialize Logging based on Environment
    match config.env {
        Env::Local => {
            // LOCAL: Pretty print output for human readability.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // PROD: JSON output for log aggregators.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Navigation gate starting in {:?} mode", config.env);

    // 4. Navigation Gate Assembly
    // Route table, guard policy and redirect limit are validated here. An ambiguous table or an
    // unusable redirect setting must never serve traffic.
    let bind_addr = config.bind_addr.clone();
    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(err) => {
            tracing::error!(error = %err, "FATAL: navigation gate failed to initialize");
            std::process::exit(1);
        }
    };
    tracing::info!(routes = state.gate.table().len(), "route table loaded");

    // 5. Router and Server Startup
    let app = create_router(state);

    // Binds the TCP listener and initiates the HTTP server.

    let listener = TcpListener::bind(&bind_addr)
        .await
        .expect("FATAL: failed to bind GATE_BIND_ADDR");

    tracing::info!("Listening on {}", bind_addr);
    tracing::info!("API Documentation (Swagger UI) available at: http://{}/swagger-ui", bind_addr);

    axum::serve(listener, app).await.expect("FATAL: HTTP server error");
}
