//! Axum route handlers for the employee API.
//!
//! Create and update accept `multipart/form-data` because the sample-text
//! file rides along with the regular fields.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::warn;
use uuid::Uuid;

use crate::employees::store::{
    delete_employee_row, get_employee, insert_employee, list_employees, update_employee,
    EmployeeUpdate, NewEmployee,
};
use crate::errors::AppError;
use crate::models::employee::EmployeeRow;
use crate::state::AppState;
use crate::storage;

// ────────────────────────────────────────────────────────────────────────────
// Form parsing
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct EmployeeForm {
    name: Option<String>,
    email: Option<String>,
    linkedin_profile: Option<String>,
    google_drive_folder_id: Option<String>,
    tone_description: Option<String>,
    sample_texts: Option<(String, Bytes)>,
}

async fn parse_employee_form(mut multipart: Multipart) -> Result<EmployeeForm, AppError> {
    let mut form = EmployeeForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "name" => form.name = Some(read_text(field).await?),
            "email" => form.email = Some(read_text(field).await?),
            "linkedin_profile" => form.linkedin_profile = Some(read_text(field).await?),
            "google_drive_folder_id" => {
                form.google_drive_folder_id = Some(read_text(field).await?)
            }
            "tone_description" => form.tone_description = Some(read_text(field).await?),
            "sample_texts" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                validate_sample_filename(&filename)?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid file upload: {e}")))?;
                form.sample_texts = Some((filename, data));
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart field: {e}")))
}

fn validate_sample_filename(filename: &str) -> Result<(), AppError> {
    if !filename.ends_with(".txt") {
        return Err(AppError::Validation(
            "Sample texts must be a .txt file".to_string(),
        ));
    }
    Ok(())
}

fn require_non_empty(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/employees
///
/// All employees, newest first.
pub async fn handle_list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeRow>>, AppError> {
    Ok(Json(list_employees(&state.db).await?))
}

/// GET /api/v1/employees/:id
pub async fn handle_get_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EmployeeRow>, AppError> {
    let employee = get_employee(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))?;
    Ok(Json(employee))
}

/// POST /api/v1/employees  (multipart)
///
/// Creates an employee. When a `sample_texts` file is attached it is stored
/// first; the row then points at the stored object.
pub async fn handle_create_employee(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EmployeeRow>, AppError> {
    let form = parse_employee_form(multipart).await?;

    let name = form.name.unwrap_or_default();
    let email = form.email.unwrap_or_default();
    require_non_empty(&name, "name")?;
    require_non_empty(&email, "email")?;

    let sample_texts_key = match form.sample_texts {
        Some((filename, data)) => {
            storage::upload_sample_texts(&state.s3, &state.config.s3_bucket, &filename, data)
                .await?
        }
        None => String::new(),
    };

    let employee = insert_employee(
        &state.db,
        NewEmployee {
            name: &name,
            email: &email,
            linkedin_profile: form.linkedin_profile.as_deref().unwrap_or(""),
            google_drive_folder_id: form.google_drive_folder_id.as_deref().unwrap_or(""),
            tone_description: form.tone_description.as_deref().unwrap_or(""),
            sample_texts_key: &sample_texts_key,
        },
    )
    .await?;

    Ok(Json(employee))
}

/// PATCH /api/v1/employees/:id  (multipart)
///
/// Partial update; omitted fields keep their value. A new `sample_texts`
/// file replaces the key the row points at.
pub async fn handle_update_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> Result<Json<EmployeeRow>, AppError> {
    get_employee(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))?;

    let form = parse_employee_form(multipart).await?;

    if let Some(name) = &form.name {
        require_non_empty(name, "name")?;
    }
    if let Some(email) = &form.email {
        require_non_empty(email, "email")?;
    }

    let sample_texts_key = match form.sample_texts {
        Some((filename, data)) => Some(
            storage::upload_sample_texts(&state.s3, &state.config.s3_bucket, &filename, data)
                .await?,
        ),
        None => None,
    };

    let employee = update_employee(
        &state.db,
        id,
        &EmployeeUpdate {
            name: form.name,
            email: form.email,
            linkedin_profile: form.linkedin_profile,
            google_drive_folder_id: form.google_drive_folder_id,
            tone_description: form.tone_description,
            sample_texts_key,
        },
    )
    .await?;

    Ok(Json(employee))
}

/// DELETE /api/v1/employees/:id
///
/// Removes the employee together with the uploaded sample texts and the
/// style profile. Workflow records stay behind as history. A failed blob
/// delete is logged and does not block the rest.
pub async fn handle_delete_employee(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let employee = get_employee(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))?;

    if !employee.sample_texts_key.is_empty() {
        if let Err(e) = storage::delete_sample_texts(
            &state.s3,
            &state.config.s3_bucket,
            &employee.sample_texts_key,
        )
        .await
        {
            warn!("Could not delete sample texts for employee {id}: {e}");
        }
    }

    state.profiles.delete_by_employee(id).await?;
    delete_employee_row(&state.db, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
