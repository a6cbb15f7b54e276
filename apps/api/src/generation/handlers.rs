//! Axum route handlers for the generation module.

use axum::Json;
use serde::Deserialize;

use crate::errors::AppError;
use crate::generation::stats::{post_stats, PostStats};

#[derive(Debug, Deserialize)]
pub struct StatsRequest {
    /// Absent content counts as empty — the review pane asks for stats
    /// before anything was generated.
    #[serde(default)]
    pub content: Option<String>,
}

/// POST /api/v1/stats
pub async fn handle_post_stats(
    Json(request): Json<StatsRequest>,
) -> Result<Json<PostStats>, AppError> {
    let content = request.content.unwrap_or_default();
    Ok(Json(post_stats(&content)))
}
