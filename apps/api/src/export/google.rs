//! Google Docs exporter.
//!
//! Credentials live in a [`GoogleSession`]: a refresh token from config plus
//! a cached access token with its expiry. Each API call asks the session for
//! a token; the session refreshes only when the cached one is missing or
//! about to expire. No global token state, no consent round-trips.

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::errors::AppError;

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DOCS_API_URL: &str = "https://docs.googleapis.com/v1/documents";
const DRIVE_API_URL: &str = "https://www.googleapis.com/drive/v3/files";

/// Refresh this long before the reported expiry so a token cannot lapse
/// between the check and the API call.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Exports review-approved content to an external document and returns where
/// it landed.
///
/// Carried in `AppState` as `Arc<dyn DocumentExporter>` so the workflow
/// machine can be exercised against a stub in tests.
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    async fn export(
        &self,
        content: &str,
        employee_name: &str,
        folder_id: &str,
    ) -> Result<ExportedDoc, AppError>;
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportedDoc {
    pub doc_url: String,
    pub doc_id: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Credential session
// ────────────────────────────────────────────────────────────────────────────

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

pub struct GoogleSession {
    http: Client,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    token: Mutex<Option<CachedToken>>,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

impl GoogleSession {
    pub fn new(http: Client, client_id: String, client_secret: String, refresh_token: String) -> Self {
        Self {
            http,
            client_id,
            client_secret,
            refresh_token,
            token: Mutex::new(None),
        }
    }

    /// Returns a valid access token, refreshing through the OAuth
    /// refresh-token grant when the cached one is missing or near expiry.
    async fn access_token(&self) -> Result<String, AppError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at > Instant::now() {
                return Ok(token.access_token.clone());
            }
        }

        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", self.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Export(format!("Google token refresh failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Export(format!(
                "Google token refresh rejected (status {status}): {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| AppError::Export(format!("Google token response malformed: {e}")))?;

        let lifetime = Duration::from_secs(token.expires_in).saturating_sub(TOKEN_EXPIRY_MARGIN);
        let expires_at = Instant::now() + lifetime;
        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at,
        });

        Ok(access_token)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Exporter
// ────────────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct CreateDocRequest<'a> {
    title: &'a str,
}

#[derive(Deserialize)]
struct CreateDocResponse {
    #[serde(rename = "documentId")]
    document_id: Option<String>,
}

#[derive(Serialize)]
struct BatchUpdateRequest<'a> {
    requests: Vec<DocRequest<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DocRequest<'a> {
    insert_text: InsertTextRequest<'a>,
}

#[derive(Serialize)]
struct InsertTextRequest<'a> {
    location: InsertLocation,
    text: &'a str,
}

#[derive(Serialize)]
struct InsertLocation {
    index: u32,
}

#[derive(Deserialize)]
struct FileParentsResponse {
    parents: Option<Vec<String>>,
}

pub struct GoogleDocsExporter {
    http: Client,
    session: GoogleSession,
}

impl GoogleDocsExporter {
    pub fn new(http: Client, session: GoogleSession) -> Self {
        Self { http, session }
    }

    async fn create_document(&self, token: &str, title: &str) -> Result<String, AppError> {
        let response = self
            .http
            .post(DOCS_API_URL)
            .bearer_auth(token)
            .json(&CreateDocRequest { title })
            .send()
            .await
            .map_err(|e| AppError::Export(format!("Document creation failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Export(format!(
                "Document creation rejected (status {status}): {body}"
            )));
        }

        let created: CreateDocResponse = response
            .json()
            .await
            .map_err(|e| AppError::Export(format!("Document creation response malformed: {e}")))?;

        created
            .document_id
            .ok_or_else(|| AppError::Export("Document creation returned no id".to_string()))
    }

    async fn insert_text(&self, token: &str, doc_id: &str, text: &str) -> Result<(), AppError> {
        let response = self
            .http
            .post(format!("{DOCS_API_URL}/{doc_id}:batchUpdate"))
            .bearer_auth(token)
            .json(&BatchUpdateRequest {
                requests: vec![DocRequest {
                    insert_text: InsertTextRequest {
                        // An empty Google Doc's body starts at index 1.
                        location: InsertLocation { index: 1 },
                        text,
                    },
                }],
            })
            .send()
            .await
            .map_err(|e| AppError::Export(format!("Document update failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Export(format!(
                "Document update rejected (status {status}): {body}"
            )));
        }
        Ok(())
    }

    async fn move_to_folder(
        &self,
        token: &str,
        doc_id: &str,
        folder_id: &str,
    ) -> Result<(), AppError> {
        let response = self
            .http
            .get(format!("{DRIVE_API_URL}/{doc_id}"))
            .bearer_auth(token)
            .query(&[("fields", "parents")])
            .send()
            .await
            .map_err(|e| AppError::Export(format!("Drive parent lookup failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Export(format!(
                "Drive parent lookup rejected (status {status}): {body}"
            )));
        }

        let file: FileParentsResponse = response
            .json()
            .await
            .map_err(|e| AppError::Export(format!("Drive parent response malformed: {e}")))?;
        let previous_parents = file.parents.unwrap_or_default().join(",");

        let response = self
            .http
            .patch(format!("{DRIVE_API_URL}/{doc_id}"))
            .bearer_auth(token)
            .query(&[
                ("addParents", folder_id),
                ("removeParents", previous_parents.as_str()),
                ("fields", "id, parents"),
            ])
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| AppError::Export(format!("Drive move failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Export(format!(
                "Drive move rejected (status {status}): {body}"
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentExporter for GoogleDocsExporter {
    /// Create the doc, insert the content, then file it into the employee's
    /// folder. A failed move is a partial success: the doc exists and is
    /// returned, so a second approval cannot create a duplicate.
    async fn export(
        &self,
        content: &str,
        employee_name: &str,
        folder_id: &str,
    ) -> Result<ExportedDoc, AppError> {
        let token = self.session.access_token().await?;

        let title = doc_title(employee_name, Local::now().date_naive());
        let doc_id = self.create_document(&token, &title).await?;
        self.insert_text(&token, &doc_id, content).await?;

        if !folder_id.is_empty() {
            if let Err(e) = self.move_to_folder(&token, &doc_id, folder_id).await {
                warn!("Document {doc_id} created but left unfiled: {e}");
            }
        }

        let exported = ExportedDoc {
            doc_url: doc_url(&doc_id),
            doc_id,
        };
        info!("Exported post for {employee_name} to {}", exported.doc_url);
        Ok(exported)
    }
}

fn doc_title(employee_name: &str, date: NaiveDate) -> String {
    format!("LinkedIn Post - {employee_name} - {}", date.format("%d.%m.%Y"))
}

fn doc_url(doc_id: &str) -> String {
    format!("https://docs.google.com/document/d/{doc_id}/edit")
}
