//! Style profile persistence — one profile per employee, replaced wholesale
//! on re-analysis.
//!
//! `AppState` holds an `Arc<dyn StyleProfileStore>` so the workflow and
//! analyzer code can be exercised against an in-memory store in tests.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::style_profile::{QualitativeProfile, QuantitativeProfile, StyleProfileRow};

#[async_trait]
pub trait StyleProfileStore: Send + Sync {
    /// Returns the employee's profile, or `None` when never analyzed.
    async fn get_by_employee(&self, employee_id: Uuid) -> Result<Option<StyleProfileRow>, AppError>;

    /// Inserts or fully replaces the employee's profile. The stored row gets
    /// a fresh id and analysis timestamp either way.
    async fn upsert(
        &self,
        employee_id: Uuid,
        quantitative: &QuantitativeProfile,
        qualitative: &QualitativeProfile,
    ) -> Result<StyleProfileRow, AppError>;

    async fn delete_by_employee(&self, employee_id: Uuid) -> Result<(), AppError>;
}

pub struct PgStyleProfileStore {
    pool: PgPool,
}

impl PgStyleProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StyleProfileStore for PgStyleProfileStore {
    async fn get_by_employee(&self, employee_id: Uuid) -> Result<Option<StyleProfileRow>, AppError> {
        Ok(sqlx::query_as::<_, StyleProfileRow>(
            "SELECT * FROM style_profiles WHERE employee_id = $1",
        )
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn upsert(
        &self,
        employee_id: Uuid,
        quantitative: &QuantitativeProfile,
        qualitative: &QualitativeProfile,
    ) -> Result<StyleProfileRow, AppError> {
        // The UNIQUE constraint on employee_id makes this atomic: a conflict
        // replaces the previous profile, id included.
        Ok(sqlx::query_as::<_, StyleProfileRow>(
            r#"
            INSERT INTO style_profiles (id, employee_id, analyzed_at, quantitative, qualitative)
            VALUES ($1, $2, now(), $3, $4)
            ON CONFLICT (employee_id) DO UPDATE
                SET id = EXCLUDED.id,
                    analyzed_at = EXCLUDED.analyzed_at,
                    quantitative = EXCLUDED.quantitative,
                    qualitative = EXCLUDED.qualitative
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(employee_id)
        .bind(Json(quantitative))
        .bind(Json(qualitative))
        .fetch_one(&self.pool)
        .await?)
    }

    async fn delete_by_employee(&self, employee_id: Uuid) -> Result<(), AppError> {
        sqlx::query("DELETE FROM style_profiles WHERE employee_id = $1")
            .bind(employee_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
