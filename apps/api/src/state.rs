use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::export::DocumentExporter;
use crate::generation::generator::PostGenerator;
use crate::llm_client::LlmClient;
use crate::notify::EmployeeNotifier;
use crate::style::store::StyleProfileStore;
use crate::workflow::{SessionRegistry, WorkflowStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub llm: LlmClient,
    pub config: Config,
    /// Pluggable collaborators behind traits. Production impls are picked
    /// once in main; tests drive the workflow machine with in-memory fakes.
    pub profiles: Arc<dyn StyleProfileStore>,
    pub workflows: Arc<dyn WorkflowStore>,
    pub generator: Arc<dyn PostGenerator>,
    pub exporter: Arc<dyn DocumentExporter>,
    pub notifier: Arc<dyn EmployeeNotifier>,
    /// Live workflow sessions, one per open editing surface.
    pub sessions: SessionRegistry,
}
