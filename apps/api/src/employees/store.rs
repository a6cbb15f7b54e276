use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::employee::EmployeeRow;

pub struct NewEmployee<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub linkedin_profile: &'a str,
    pub google_drive_folder_id: &'a str,
    pub tone_description: &'a str,
    pub sample_texts_key: &'a str,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Default)]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub linkedin_profile: Option<String>,
    pub google_drive_folder_id: Option<String>,
    pub tone_description: Option<String>,
    pub sample_texts_key: Option<String>,
}

pub async fn list_employees(pool: &PgPool) -> Result<Vec<EmployeeRow>, AppError> {
    Ok(
        sqlx::query_as::<_, EmployeeRow>("SELECT * FROM employees ORDER BY created_at DESC")
            .fetch_all(pool)
            .await?,
    )
}

pub async fn get_employee(pool: &PgPool, id: Uuid) -> Result<Option<EmployeeRow>, AppError> {
    Ok(
        sqlx::query_as::<_, EmployeeRow>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await?,
    )
}

pub async fn insert_employee(
    pool: &PgPool,
    employee: NewEmployee<'_>,
) -> Result<EmployeeRow, AppError> {
    Ok(sqlx::query_as::<_, EmployeeRow>(
        r#"
        INSERT INTO employees
            (id, name, email, linkedin_profile, google_drive_folder_id,
             tone_description, sample_texts_key)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(employee.name)
    .bind(employee.email)
    .bind(employee.linkedin_profile)
    .bind(employee.google_drive_folder_id)
    .bind(employee.tone_description)
    .bind(employee.sample_texts_key)
    .fetch_one(pool)
    .await?)
}

pub async fn update_employee(
    pool: &PgPool,
    id: Uuid,
    update: &EmployeeUpdate,
) -> Result<EmployeeRow, AppError> {
    sqlx::query_as::<_, EmployeeRow>(
        r#"
        UPDATE employees SET
            name                   = COALESCE($2, name),
            email                  = COALESCE($3, email),
            linkedin_profile       = COALESCE($4, linkedin_profile),
            google_drive_folder_id = COALESCE($5, google_drive_folder_id),
            tone_description       = COALESCE($6, tone_description),
            sample_texts_key       = COALESCE($7, sample_texts_key),
            updated_at             = now()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(update.name.as_deref())
    .bind(update.email.as_deref())
    .bind(update.linkedin_profile.as_deref())
    .bind(update.google_drive_folder_id.as_deref())
    .bind(update.tone_description.as_deref())
    .bind(update.sample_texts_key.as_deref())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Employee {id} not found")))
}

pub async fn delete_employee_row(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM employees WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Employee {id} not found")));
    }
    Ok(())
}
