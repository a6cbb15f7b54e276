//! Axum route handlers for the style profile API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::task::JoinSet;
use tracing::warn;
use uuid::Uuid;

use crate::employees::store::get_employee;
use crate::errors::AppError;
use crate::models::style_profile::StyleProfileRow;
use crate::state::AppState;
use crate::storage;
use crate::style::analyzer::analyze_style;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PrefetchRequest {
    pub employee_ids: Vec<Uuid>,
}

/// Employees without a profile map to `null`, exactly like a failed lookup:
/// the caller treats both as "not analyzed yet".
#[derive(Debug, Serialize)]
pub struct PrefetchResponse {
    pub profiles: HashMap<Uuid, Option<StyleProfileRow>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/employees/:id/style-profile
///
/// Returns the employee's profile, or `null` when never analyzed. Absence is
/// a normal state, not an error.
pub async fn handle_get_style_profile(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<Option<StyleProfileRow>>, AppError> {
    get_employee(&state.db, employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {employee_id} not found")))?;

    let profile = state.profiles.get_by_employee(employee_id).await?;
    Ok(Json(profile))
}

/// POST /api/v1/employees/:id/style-profile/analyze
///
/// Downloads the employee's sample texts and runs style analysis, replacing
/// any previous profile.
pub async fn handle_analyze_style(
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<Json<StyleProfileRow>, AppError> {
    let employee = get_employee(&state.db, employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {employee_id} not found")))?;

    if employee.sample_texts_key.is_empty() {
        return Err(AppError::Validation(
            "Employee has no uploaded sample texts to analyze".to_string(),
        ));
    }

    let sample_texts = storage::fetch_sample_texts(
        &state.s3,
        &state.config.s3_bucket,
        &employee.sample_texts_key,
    )
    .await?;

    let profile = analyze_style(&state.llm, state.profiles.as_ref(), employee_id, &sample_texts).await?;

    Ok(Json(profile))
}

/// POST /api/v1/style-profiles/prefetch
///
/// Fetches profiles for many employees concurrently. A failed lookup is
/// logged and reported as `null` for that employee; it never fails the
/// whole request.
pub async fn handle_prefetch_style_profiles(
    State(state): State<AppState>,
    Json(request): Json<PrefetchRequest>,
) -> Result<Json<PrefetchResponse>, AppError> {
    let mut lookups = JoinSet::new();
    for employee_id in request.employee_ids {
        let profiles = state.profiles.clone();
        lookups.spawn(async move { (employee_id, profiles.get_by_employee(employee_id).await) });
    }

    let mut profiles = HashMap::new();
    while let Some(joined) = lookups.join_next().await {
        match joined {
            Ok((employee_id, Ok(profile))) => {
                profiles.insert(employee_id, profile);
            }
            Ok((employee_id, Err(e))) => {
                warn!("Style profile prefetch for {employee_id} failed: {e}");
                profiles.insert(employee_id, None);
            }
            Err(e) => warn!("Style profile prefetch task failed: {e}"),
        }
    }

    Ok(Json(PrefetchResponse { profiles }))
}
