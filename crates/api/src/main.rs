use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixshift_api::config::ServerConfig;
use pixshift_api::router::build_app_router;
use pixshift_api::state::AppState;
use pixshift_inference::InferenceClient;
use pixshift_storage::ObjectStore;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixshift_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = pixshift_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    pixshift_db::health_check(&pool)
        .await
        .expect("Database health check failed");

    pixshift_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Object store ---
    let storage = Arc::new(ObjectStore::new(config.object_store.clone()).await);
    tracing::info!("Object store client created");

    // --- Inference provider ---
    // Absence of the token is reported per-request by the generate
    // handler, not at startup, so ops can boot the service and fix
    // configuration without a crash loop.
    let inference = config.inference_api_token.as_ref().map(|token| {
        Arc::new(InferenceClient::new(
            config.inference_api_url.clone(),
            token.clone(),
        ))
    });
    if inference.is_none() {
        tracing::warn!("INFERENCE_API_TOKEN not set; generation requests will fail");
    }

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        storage,
        inference,
        http: reqwest::Client::new(),
    };

    let app = build_app_router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Invalid HOST/PORT combination");

    tracing::info!(%addr, "pixshift API listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
