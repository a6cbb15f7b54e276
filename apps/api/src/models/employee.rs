use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EmployeeRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub linkedin_profile: String,
    pub google_drive_folder_id: String,
    pub tone_description: String,
    /// S3 object key of the uploaded sample texts; empty when nothing was
    /// uploaded yet.
    pub sample_texts_key: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
