mod config;
mod db;
mod employees;
mod errors;
mod export;
mod generation;
mod llm_client;
mod models;
mod notify;
mod routes;
mod state;
mod storage;
mod style;
mod workflow;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::create_pool;
use crate::export::{DocumentExporter, GoogleDocsExporter, GoogleSession};
use crate::generation::generator::LlmPostGenerator;
use crate::llm_client::LlmClient;
use crate::notify::{EmployeeNotifier, LogOnlyNotifier, SendGridNotifier};
use crate::routes::build_router;
use crate::state::AppState;
use crate::style::store::PgStyleProfileStore;
use crate::workflow::{PgWorkflowStore, SessionRegistry};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (panics on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Ghostwriter API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and run migrations
    let db = create_pool(&config.database_url).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // One HTTP client shared by the Google and SendGrid integrations
    let http = reqwest::Client::new();

    // Google Docs exporter, authenticated via the refresh-token grant
    let session = GoogleSession::new(
        http.clone(),
        config.google_client_id.clone(),
        config.google_client_secret.clone(),
        config.google_refresh_token.clone(),
    );
    let exporter: Arc<dyn DocumentExporter> =
        Arc::new(GoogleDocsExporter::new(http.clone(), session));

    // Notifier backend: SendGrid when an API key is configured, log-only otherwise
    let notifier: Arc<dyn EmployeeNotifier> = match &config.sendgrid_api_key {
        Some(key) => {
            info!("Notifier: SendGrid");
            Arc::new(SendGridNotifier::new(http, key.clone()))
        }
        None => {
            info!("Notifier: log-only (SENDGRID_API_KEY not set)");
            Arc::new(LogOnlyNotifier)
        }
    };

    // Build app state
    let state = AppState {
        db: db.clone(),
        s3,
        llm: llm.clone(),
        config: config.clone(),
        profiles: Arc::new(PgStyleProfileStore::new(db.clone())),
        workflows: Arc::new(PgWorkflowStore::new(db)),
        generator: Arc::new(LlmPostGenerator::new(llm)),
        exporter,
        notifier,
        sessions: SessionRegistry::new(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "ghostwriter-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
