//! Axum route handlers for the workflow API.
//!
//! Two surfaces live here: the session endpoints the editing UI drives
//! (one event per route, mapped onto the state machine in `machine`), and
//! plain reads over the persisted workflow records.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::employees::store::get_employee;
use crate::errors::AppError;
use crate::generation::stats::{post_stats, PostStats};
use crate::models::workflow::{WorkflowRow, WorkflowStatus};
use crate::state::AppState;
use crate::workflow::WorkflowSession;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ContentBody {
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct SelectEmployeeBody {
    pub employee_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct NotifyResponse {
    pub sent: bool,
}

#[derive(Debug, Deserialize)]
pub struct WorkflowListQuery {
    pub employee_id: Option<Uuid>,
}

/// Snapshot of a live session, the shape the editing UI renders from.
/// `workflow_id` stays null until the first successful generation persists
/// a record.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub id: Uuid,
    pub status: WorkflowStatus,
    pub input_content: String,
    pub employee_id: Option<Uuid>,
    pub employee_name: Option<String>,
    pub has_style_profile: bool,
    pub generated_post: String,
    pub edited_post: String,
    pub doc_url: Option<String>,
    pub doc_id: Option<String>,
    pub workflow_id: Option<Uuid>,
}

impl SessionView {
    fn of(session: &WorkflowSession) -> Self {
        Self {
            id: session.id,
            status: session.status,
            input_content: session.input_content.clone(),
            employee_id: session.employee.as_ref().map(|e| e.id),
            employee_name: session.employee.as_ref().map(|e| e.name.clone()),
            has_style_profile: session.style_profile.is_some(),
            generated_post: session.generated_post.clone(),
            edited_post: session.edited_post.clone(),
            doc_url: session.doc_url.clone(),
            doc_id: session.doc_id.clone(),
            workflow_id: session.workflow_id,
        }
    }
}

async fn session_or_404(
    state: &AppState,
    id: Uuid,
) -> Result<Arc<Mutex<WorkflowSession>>, AppError> {
    state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Session handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/workflow/sessions
///
/// Opens a fresh DRAFT session. Nothing is persisted until the first
/// successful generation.
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<Json<SessionView>, AppError> {
    let handle = state.sessions.create().await;
    let view = SessionView::of(&*handle.lock().await);
    Ok(Json(view))
}

/// GET /api/v1/workflow/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = session_or_404(&state, id).await?;
    let view = SessionView::of(&*handle.lock().await);
    Ok(Json(view))
}

/// PUT /api/v1/workflow/sessions/:id/input
pub async fn handle_set_input(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ContentBody>,
) -> Result<Json<SessionView>, AppError> {
    let handle = session_or_404(&state, id).await?;
    let mut session = handle.lock().await;
    session.set_input(body.content);
    Ok(Json(SessionView::of(&session)))
}

/// PUT /api/v1/workflow/sessions/:id/employee
///
/// Selects the persona. The employee and their style profile are joined at
/// read time; a missing profile is allowed here and rejected only when
/// generation is attempted.
pub async fn handle_select_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SelectEmployeeBody>,
) -> Result<Json<SessionView>, AppError> {
    let employee = get_employee(&state.db, body.employee_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {} not found", body.employee_id)))?;
    let profile = state.profiles.get_by_employee(body.employee_id).await?;

    let handle = session_or_404(&state, id).await?;
    let mut session = handle.lock().await;
    session.select_employee(employee, profile);
    Ok(Json(SessionView::of(&session)))
}

/// PUT /api/v1/workflow/sessions/:id/edited
///
/// Updates the edited text in memory only; `save` persists it.
pub async fn handle_set_edited(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ContentBody>,
) -> Result<Json<SessionView>, AppError> {
    let handle = session_or_404(&state, id).await?;
    let mut session = handle.lock().await;
    session.set_edited(body.content);
    Ok(Json(SessionView::of(&session)))
}

/// POST /api/v1/workflow/sessions/:id/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = session_or_404(&state, id).await?;
    let mut session = handle.lock().await;
    session
        .generate(state.generator.as_ref(), state.workflows.as_ref())
        .await?;
    Ok(Json(SessionView::of(&session)))
}

/// POST /api/v1/workflow/sessions/:id/regenerate
pub async fn handle_regenerate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = session_or_404(&state, id).await?;
    let mut session = handle.lock().await;
    session
        .regenerate(state.generator.as_ref(), state.workflows.as_ref())
        .await?;
    Ok(Json(SessionView::of(&session)))
}

/// POST /api/v1/workflow/sessions/:id/save
pub async fn handle_save(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = session_or_404(&state, id).await?;
    let session = handle.lock().await;
    session.save(state.workflows.as_ref()).await?;
    Ok(Json(SessionView::of(&session)))
}

/// POST /api/v1/workflow/sessions/:id/approve
///
/// The approval gate: exports the edited post and advances to APPROVED.
/// The response view carries the document references.
pub async fn handle_approve(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = session_or_404(&state, id).await?;
    let mut session = handle.lock().await;
    session
        .approve(state.exporter.as_ref(), state.workflows.as_ref())
        .await?;
    Ok(Json(SessionView::of(&session)))
}

/// POST /api/v1/workflow/sessions/:id/notify
///
/// Tells the employee their post is ready. `sent: false` means the
/// notification did not go out (missing document or provider refusal);
/// the session stays in APPROVED for a manual retry.
pub async fn handle_notify(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<NotifyResponse>, AppError> {
    let handle = session_or_404(&state, id).await?;
    let mut session = handle.lock().await;
    let sent = session
        .send_notification(state.notifier.as_ref(), state.workflows.as_ref())
        .await?;
    Ok(Json(NotifyResponse { sent }))
}

/// POST /api/v1/workflow/sessions/:id/reset
///
/// Discards all in-memory state and returns the session to DRAFT. The
/// persisted workflow record is untouched.
pub async fn handle_reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let handle = session_or_404(&state, id).await?;
    let mut session = handle.lock().await;
    session.reset();
    Ok(Json(SessionView::of(&session)))
}

/// GET /api/v1/workflow/sessions/:id/stats
///
/// Live counts over the edited post, for the review pane.
pub async fn handle_session_stats(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostStats>, AppError> {
    let handle = session_or_404(&state, id).await?;
    let session = handle.lock().await;
    Ok(Json(post_stats(&session.edited_post)))
}

/// DELETE /api/v1/workflow/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(AppError::NotFound(format!("Session {id} not found")));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Workflow record handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/workflows
///
/// All persisted workflows, newest first; `?employee_id=` narrows to one
/// employee's history.
pub async fn handle_list_workflows(
    State(state): State<AppState>,
    Query(query): Query<WorkflowListQuery>,
) -> Result<Json<Vec<WorkflowRow>>, AppError> {
    let rows = match query.employee_id {
        Some(employee_id) => state.workflows.list_by_employee(employee_id).await?,
        None => state.workflows.list().await?,
    };
    Ok(Json(rows))
}

/// GET /api/v1/workflows/:id
pub async fn handle_get_workflow(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<WorkflowRow>, AppError> {
    let row = state
        .workflows
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Workflow {id} not found")))?;
    Ok(Json(row))
}

/// DELETE /api/v1/workflows/:id
pub async fn handle_delete_workflow(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.workflows.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
