use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle of a post workflow. Transitions are owned by
/// `workflow::machine`; nothing else may change a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStatus {
    Draft,
    Generating,
    Review,
    Approved,
    Notified,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Draft => "DRAFT",
            WorkflowStatus::Generating => "GENERATING",
            WorkflowStatus::Review => "REVIEW",
            WorkflowStatus::Approved => "APPROVED",
            WorkflowStatus::Notified => "NOTIFIED",
        }
    }
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WorkflowStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(WorkflowStatus::Draft),
            "GENERATING" => Ok(WorkflowStatus::Generating),
            "REVIEW" => Ok(WorkflowStatus::Review),
            "APPROVED" => Ok(WorkflowStatus::Approved),
            "NOTIFIED" => Ok(WorkflowStatus::Notified),
            other => Err(format!("unknown workflow status '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct WorkflowRow {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub input_content: String,
    pub generated_content: String,
    pub edited_content: String,
    pub status: String,
    pub google_doc_url: Option<String>,
    pub google_doc_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
