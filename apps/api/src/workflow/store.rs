//! Workflow persistence.
//!
//! Records are created lazily: nothing is written until the first successful
//! generation, after which the machine patches the same row as the session
//! advances.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::workflow::{WorkflowRow, WorkflowStatus};

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Default)]
pub struct WorkflowPatch<'a> {
    pub generated_content: Option<&'a str>,
    pub edited_content: Option<&'a str>,
    pub status: Option<WorkflowStatus>,
    pub google_doc_url: Option<&'a str>,
    pub google_doc_id: Option<&'a str>,
}

#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Creates a DRAFT record and returns its id.
    async fn create(&self, employee_id: Uuid, input_content: &str) -> Result<Uuid, AppError>;

    async fn update(&self, id: Uuid, patch: WorkflowPatch<'_>) -> Result<(), AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<WorkflowRow>, AppError>;

    /// All workflows, newest first.
    async fn list(&self) -> Result<Vec<WorkflowRow>, AppError>;

    async fn list_by_employee(&self, employee_id: Uuid) -> Result<Vec<WorkflowRow>, AppError>;

    async fn delete(&self, id: Uuid) -> Result<(), AppError>;
}

pub struct PgWorkflowStore {
    pool: PgPool,
}

impl PgWorkflowStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkflowStore for PgWorkflowStore {
    async fn create(&self, employee_id: Uuid, input_content: &str) -> Result<Uuid, AppError> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO workflows (id, employee_id, input_content, status)
            VALUES ($1, $2, $3, 'DRAFT')
            "#,
        )
        .bind(id)
        .bind(employee_id)
        .bind(input_content)
        .execute(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update(&self, id: Uuid, patch: WorkflowPatch<'_>) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE workflows SET
                generated_content = COALESCE($2, generated_content),
                edited_content    = COALESCE($3, edited_content),
                status            = COALESCE($4, status),
                google_doc_url    = COALESCE($5, google_doc_url),
                google_doc_id     = COALESCE($6, google_doc_id),
                updated_at        = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(patch.generated_content)
        .bind(patch.edited_content)
        .bind(patch.status.map(|s| s.as_str()))
        .bind(patch.google_doc_url)
        .bind(patch.google_doc_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<WorkflowRow>, AppError> {
        Ok(
            sqlx::query_as::<_, WorkflowRow>("SELECT * FROM workflows WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn list(&self) -> Result<Vec<WorkflowRow>, AppError> {
        Ok(
            sqlx::query_as::<_, WorkflowRow>("SELECT * FROM workflows ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn list_by_employee(&self, employee_id: Uuid) -> Result<Vec<WorkflowRow>, AppError> {
        Ok(sqlx::query_as::<_, WorkflowRow>(
            "SELECT * FROM workflows WHERE employee_id = $1 ORDER BY created_at DESC",
        )
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM workflows WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Workflow {id} not found")));
        }
        Ok(())
    }
}
