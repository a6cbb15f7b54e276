//! The workflow state machine.
//!
//! A [`WorkflowSession`] owns its `status`; the transition methods below are
//! the only code that changes it, and the exporter and notifier are
//! reachable only through their guarded transitions. A failed external call
//! leaves the status where it was, except generation failure, which reverts
//! GENERATING to DRAFT. Nothing here retries: trying again is always an
//! explicit user event.

use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::{DocumentExporter, ExportedDoc};
use crate::generation::generator::PostGenerator;
use crate::models::employee::EmployeeRow;
use crate::models::style_profile::StyleProfileRow;
use crate::models::workflow::WorkflowStatus;
use crate::notify::EmployeeNotifier;
use crate::workflow::store::{WorkflowPatch, WorkflowStore};

pub struct WorkflowSession {
    pub id: Uuid,
    pub status: WorkflowStatus,
    pub input_content: String,
    pub employee: Option<EmployeeRow>,
    pub style_profile: Option<StyleProfileRow>,
    pub generated_post: String,
    pub edited_post: String,
    pub doc_url: Option<String>,
    pub doc_id: Option<String>,
    /// Set by the first successful generation; later transitions patch the
    /// same record.
    pub workflow_id: Option<Uuid>,
}

impl WorkflowSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            status: WorkflowStatus::Draft,
            input_content: String::new(),
            employee: None,
            style_profile: None,
            generated_post: String::new(),
            edited_post: String::new(),
            doc_url: None,
            doc_id: None,
            workflow_id: None,
        }
    }

    // ── plain field events (no status change, no side effects) ──────────

    pub fn set_input(&mut self, content: String) {
        self.input_content = content;
    }

    pub fn select_employee(
        &mut self,
        employee: EmployeeRow,
        style_profile: Option<StyleProfileRow>,
    ) {
        self.employee = Some(employee);
        self.style_profile = style_profile;
    }

    pub fn set_edited(&mut self, content: String) {
        self.edited_post = content;
    }

    // ── transitions ─────────────────────────────────────────────────────

    /// DRAFT → GENERATING → REVIEW.
    pub async fn generate(
        &mut self,
        generator: &dyn PostGenerator,
        store: &dyn WorkflowStore,
    ) -> Result<(), AppError> {
        if self.status != WorkflowStatus::Draft {
            return Err(AppError::Validation(format!(
                "Cannot generate from status {}",
                self.status
            )));
        }
        self.run_generation(generator, store).await
    }

    /// REVIEW → GENERATING → REVIEW. Same guards as [`Self::generate`];
    /// the existing record is updated rather than a new one created.
    pub async fn regenerate(
        &mut self,
        generator: &dyn PostGenerator,
        store: &dyn WorkflowStore,
    ) -> Result<(), AppError> {
        if self.status != WorkflowStatus::Review {
            return Err(AppError::Validation(format!(
                "Cannot regenerate from status {}",
                self.status
            )));
        }
        self.run_generation(generator, store).await
    }

    async fn run_generation(
        &mut self,
        generator: &dyn PostGenerator,
        store: &dyn WorkflowStore,
    ) -> Result<(), AppError> {
        let (employee, profile) = match (&self.employee, &self.style_profile) {
            (Some(employee), Some(profile)) => (employee.clone(), profile.clone()),
            _ => {
                return Err(AppError::Validation(
                    "Select an employee with an analyzed style profile before generating"
                        .to_string(),
                ))
            }
        };
        if self.input_content.trim().is_empty() {
            return Err(AppError::Validation(
                "Enter content before generating".to_string(),
            ));
        }

        self.status = WorkflowStatus::Generating;

        let post = match generator
            .generate(&self.input_content, &employee, &profile)
            .await
        {
            Ok(post) => post,
            Err(e) => {
                self.status = WorkflowStatus::Draft;
                return Err(e);
            }
        };

        self.generated_post = post.clone();
        self.edited_post = post;

        // Lazy record creation: the first successful generation writes the
        // workflow; regeneration patches it.
        let workflow_id = match self.workflow_id {
            Some(id) => id,
            None => match store.create(employee.id, &self.input_content).await {
                Ok(id) => {
                    self.workflow_id = Some(id);
                    id
                }
                Err(e) => {
                    self.status = WorkflowStatus::Draft;
                    return Err(e);
                }
            },
        };

        let patch = WorkflowPatch {
            generated_content: Some(&self.generated_post),
            edited_content: Some(&self.edited_post),
            status: Some(WorkflowStatus::Review),
            ..Default::default()
        };
        if let Err(e) = store.update(workflow_id, patch).await {
            self.status = WorkflowStatus::Draft;
            return Err(e);
        }

        self.status = WorkflowStatus::Review;
        info!(
            "Workflow {workflow_id}: generated {} chars for employee {}",
            self.generated_post.len(),
            employee.id
        );
        Ok(())
    }

    /// REVIEW → REVIEW. Persists the edited text; safe to call repeatedly.
    pub async fn save(&self, store: &dyn WorkflowStore) -> Result<(), AppError> {
        if self.status != WorkflowStatus::Review {
            return Err(AppError::Validation(format!(
                "Cannot save from status {}",
                self.status
            )));
        }
        let Some(workflow_id) = self.workflow_id else {
            return Err(AppError::Validation(
                "No persisted workflow to save yet".to_string(),
            ));
        };

        store
            .update(
                workflow_id,
                WorkflowPatch {
                    edited_content: Some(&self.edited_post),
                    ..Default::default()
                },
            )
            .await
    }

    /// REVIEW → APPROVED. The approval gate: the exporter is called here and
    /// nowhere else. On persistence failure the session keeps the document
    /// references but stays in REVIEW, so the next approval attempt reuses
    /// what already exists instead of exporting again blindly.
    pub async fn approve(
        &mut self,
        exporter: &dyn DocumentExporter,
        store: &dyn WorkflowStore,
    ) -> Result<ExportedDoc, AppError> {
        if self.status != WorkflowStatus::Review {
            return Err(AppError::Validation(format!(
                "Cannot approve from status {}",
                self.status
            )));
        }
        let Some(employee) = self.employee.clone() else {
            return Err(AppError::Validation("No employee selected".to_string()));
        };
        if self.edited_post.trim().is_empty() {
            return Err(AppError::Validation(
                "Cannot approve an empty post".to_string(),
            ));
        }

        let doc = exporter
            .export(
                &self.edited_post,
                &employee.name,
                &employee.google_drive_folder_id,
            )
            .await?;

        self.doc_url = Some(doc.doc_url.clone());
        self.doc_id = Some(doc.doc_id.clone());

        if let Some(workflow_id) = self.workflow_id {
            store
                .update(
                    workflow_id,
                    WorkflowPatch {
                        edited_content: Some(&self.edited_post),
                        status: Some(WorkflowStatus::Approved),
                        google_doc_url: Some(&doc.doc_url),
                        google_doc_id: Some(&doc.doc_id),
                        ..Default::default()
                    },
                )
                .await?;
        }

        self.status = WorkflowStatus::Approved;
        info!(
            "Workflow {:?}: approved, exported to {}",
            self.workflow_id, doc.doc_url
        );
        Ok(doc)
    }

    /// APPROVED → NOTIFIED. Missing prerequisites (no employee, no document
    /// yet) report "not sent" without touching the email API; an unwilling
    /// provider also reports "not sent". The status advances only after the
    /// new status is persisted.
    pub async fn send_notification(
        &mut self,
        notifier: &dyn EmployeeNotifier,
        store: &dyn WorkflowStore,
    ) -> Result<bool, AppError> {
        if self.status != WorkflowStatus::Approved {
            return Err(AppError::Validation(format!(
                "Cannot send a notification from status {}",
                self.status
            )));
        }
        let (Some(employee), Some(doc_url)) = (self.employee.as_ref(), self.doc_url.as_deref())
        else {
            return Ok(false);
        };

        if !notifier.notify(employee, doc_url).await {
            return Ok(false);
        }

        if let Some(workflow_id) = self.workflow_id {
            store
                .update(
                    workflow_id,
                    WorkflowPatch {
                        status: Some(WorkflowStatus::Notified),
                        ..Default::default()
                    },
                )
                .await?;
        }

        self.status = WorkflowStatus::Notified;
        info!("Workflow {:?}: employee notified", self.workflow_id);
        Ok(true)
    }

    /// any → DRAFT. Discards all in-memory state; the persisted record (if
    /// any) is untouched.
    pub fn reset(&mut self) {
        let id = self.id;
        *self = WorkflowSession::new();
        self.id = id;
    }
}

impl Default for WorkflowSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use sqlx::types::Json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::models::style_profile::{QualitativeProfile, QuantitativeProfile};
    use crate::models::workflow::WorkflowRow;

    // ── recording fakes ─────────────────────────────────────────────────

    #[derive(Default)]
    struct StubGenerator {
        calls: AtomicUsize,
        fail_next: AtomicBool,
    }

    #[async_trait]
    impl PostGenerator for StubGenerator {
        async fn generate(
            &self,
            input: &str,
            _employee: &EmployeeRow,
            _profile: &StyleProfileRow,
        ) -> Result<String, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_next.swap(false, Ordering::SeqCst) {
                return Err(AppError::Generation("injected generation failure".into()));
            }
            Ok(format!("Generierter Beitrag zu: {input}"))
        }
    }

    #[derive(Default)]
    struct RecordingExporter {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DocumentExporter for RecordingExporter {
        async fn export(
            &self,
            _content: &str,
            _employee_name: &str,
            _folder_id: &str,
        ) -> Result<ExportedDoc, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(ExportedDoc {
                doc_url: "https://docs.google.com/document/d/test-doc/edit".to_string(),
                doc_id: "test-doc".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct FailingExporter {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DocumentExporter for FailingExporter {
        async fn export(
            &self,
            _content: &str,
            _employee_name: &str,
            _folder_id: &str,
        ) -> Result<ExportedDoc, AppError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(AppError::Export("injected export failure".into()))
        }
    }

    struct RecordingNotifier {
        calls: AtomicUsize,
        succeed: AtomicBool,
    }

    impl Default for RecordingNotifier {
        fn default() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                succeed: AtomicBool::new(true),
            }
        }
    }

    #[async_trait]
    impl EmployeeNotifier for RecordingNotifier {
        async fn notify(&self, _employee: &EmployeeRow, _doc_url: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.succeed.load(Ordering::SeqCst)
        }
    }

    #[derive(Default)]
    struct MemWorkflowStore {
        rows: Mutex<HashMap<Uuid, WorkflowRow>>,
        fail_updates: AtomicBool,
    }

    impl MemWorkflowStore {
        fn row(&self, id: Uuid) -> WorkflowRow {
            self.rows.lock().unwrap().get(&id).cloned().unwrap()
        }

        fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl WorkflowStore for MemWorkflowStore {
        async fn create(&self, employee_id: Uuid, input_content: &str) -> Result<Uuid, AppError> {
            let id = Uuid::new_v4();
            let row = WorkflowRow {
                id,
                employee_id,
                input_content: input_content.to_string(),
                generated_content: String::new(),
                edited_content: String::new(),
                status: "DRAFT".to_string(),
                google_doc_url: None,
                google_doc_id: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            self.rows.lock().unwrap().insert(id, row);
            Ok(id)
        }

        async fn update(&self, id: Uuid, patch: WorkflowPatch<'_>) -> Result<(), AppError> {
            if self.fail_updates.load(Ordering::SeqCst) {
                return Err(AppError::Internal(anyhow::anyhow!("injected store failure")));
            }
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .get_mut(&id)
                .ok_or_else(|| AppError::NotFound(format!("Workflow {id} not found")))?;
            if let Some(generated) = patch.generated_content {
                row.generated_content = generated.to_string();
            }
            if let Some(edited) = patch.edited_content {
                row.edited_content = edited.to_string();
            }
            if let Some(status) = patch.status {
                row.status = status.as_str().to_string();
            }
            if let Some(url) = patch.google_doc_url {
                row.google_doc_url = Some(url.to_string());
            }
            if let Some(doc_id) = patch.google_doc_id {
                row.google_doc_id = Some(doc_id.to_string());
            }
            row.updated_at = Utc::now();
            Ok(())
        }

        async fn get(&self, id: Uuid) -> Result<Option<WorkflowRow>, AppError> {
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn list(&self) -> Result<Vec<WorkflowRow>, AppError> {
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }

        async fn list_by_employee(&self, employee_id: Uuid) -> Result<Vec<WorkflowRow>, AppError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .values()
                .filter(|row| row.employee_id == employee_id)
                .cloned()
                .collect())
        }

        async fn delete(&self, id: Uuid) -> Result<(), AppError> {
            self.rows.lock().unwrap().remove(&id);
            Ok(())
        }
    }

    // ── fixtures ────────────────────────────────────────────────────────

    fn employee_fixture() -> EmployeeRow {
        EmployeeRow {
            id: Uuid::new_v4(),
            name: "Anna Muster".to_string(),
            email: "anna@example.ch".to_string(),
            linkedin_profile: String::new(),
            google_drive_folder_id: "folder-1".to_string(),
            tone_description: "Locker und nahbar".to_string(),
            sample_texts_key: "sample-texts/1-posts.txt".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn profile_fixture(employee_id: Uuid) -> StyleProfileRow {
        StyleProfileRow {
            id: Uuid::new_v4(),
            employee_id,
            analyzed_at: Utc::now(),
            quantitative: Json(QuantitativeProfile::default()),
            qualitative: Json(QualitativeProfile::default()),
        }
    }

    /// A session ready to generate: input set, employee and profile selected.
    fn armed_session() -> WorkflowSession {
        let employee = employee_fixture();
        let profile = profile_fixture(employee.id);
        let mut session = WorkflowSession::new();
        session.set_input("Wir suchen neue Talente".to_string());
        session.select_employee(employee, Some(profile));
        session
    }

    // ── generation ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_generate_creates_record_and_enters_review() {
        let generator = StubGenerator::default();
        let store = MemWorkflowStore::default();
        let mut session = armed_session();

        session.generate(&generator, &store).await.unwrap();

        assert_eq!(session.status, WorkflowStatus::Review);
        assert!(!session.generated_post.is_empty());
        assert_eq!(session.generated_post, session.edited_post);

        let row = store.row(session.workflow_id.unwrap());
        assert_eq!(row.status, "REVIEW");
        assert_eq!(row.input_content, "Wir suchen neue Talente");
        assert_eq!(row.generated_content, session.generated_post);
        assert_eq!(row.edited_content, session.generated_post);
    }

    #[tokio::test]
    async fn test_generate_without_selection_is_rejected() {
        let generator = StubGenerator::default();
        let store = MemWorkflowStore::default();
        let mut session = WorkflowSession::new();
        session.set_input("Inhalt".to_string());

        let err = session.generate(&generator, &store).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.status, WorkflowStatus::Draft);
    }

    #[tokio::test]
    async fn test_generate_without_profile_is_rejected() {
        let generator = StubGenerator::default();
        let store = MemWorkflowStore::default();
        let mut session = WorkflowSession::new();
        session.set_input("Inhalt".to_string());
        session.select_employee(employee_fixture(), None);

        assert!(session.generate(&generator, &store).await.is_err());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_generate_with_blank_input_is_rejected() {
        let generator = StubGenerator::default();
        let store = MemWorkflowStore::default();
        let mut session = armed_session();
        session.set_input("   ".to_string());

        assert!(session.generate(&generator, &store).await.is_err());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.status, WorkflowStatus::Draft);
    }

    #[tokio::test]
    async fn test_generate_failure_reverts_to_draft_and_persists_nothing() {
        let generator = StubGenerator::default();
        let store = MemWorkflowStore::default();
        let mut session = armed_session();

        generator.fail_next.store(true, Ordering::SeqCst);
        let err = session.generate(&generator, &store).await.unwrap_err();
        assert!(matches!(err, AppError::Generation(_)));
        assert_eq!(session.status, WorkflowStatus::Draft);
        assert_eq!(session.workflow_id, None);
        assert_eq!(store.len(), 0);

        // Manual retry from DRAFT works.
        session.generate(&generator, &store).await.unwrap();
        assert_eq!(session.status, WorkflowStatus::Review);
    }

    #[tokio::test]
    async fn test_regenerate_updates_the_same_record() {
        let generator = StubGenerator::default();
        let store = MemWorkflowStore::default();
        let mut session = armed_session();

        session.generate(&generator, &store).await.unwrap();
        let first_id = session.workflow_id.unwrap();

        // generate() is not valid from REVIEW, regenerate() is.
        assert!(session.generate(&generator, &store).await.is_err());
        session.set_input("Neuer Fokus: unser Lehrlingsprogramm".to_string());
        session.regenerate(&generator, &store).await.unwrap();

        assert_eq!(session.workflow_id, Some(first_id));
        assert_eq!(store.len(), 1);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
        assert_eq!(session.status, WorkflowStatus::Review);
    }

    #[tokio::test]
    async fn test_regenerate_from_draft_is_rejected() {
        let generator = StubGenerator::default();
        let store = MemWorkflowStore::default();
        let mut session = armed_session();

        assert!(session.regenerate(&generator, &store).await.is_err());
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    // ── save ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_save_persists_edited_only_and_is_idempotent() {
        let generator = StubGenerator::default();
        let store = MemWorkflowStore::default();
        let mut session = armed_session();
        session.generate(&generator, &store).await.unwrap();
        let original_post = session.generated_post.clone();

        session.set_edited("Kurz und knapp.".to_string());
        session.save(&store).await.unwrap();
        session.save(&store).await.unwrap();

        let row = store.row(session.workflow_id.unwrap());
        assert_eq!(row.edited_content, "Kurz und knapp.");
        assert_eq!(row.generated_content, original_post);
        assert_eq!(row.status, "REVIEW");
        assert_eq!(session.status, WorkflowStatus::Review);
    }

    #[tokio::test]
    async fn test_save_outside_review_is_rejected() {
        let store = MemWorkflowStore::default();
        let session = WorkflowSession::new();
        assert!(session.save(&store).await.is_err());
    }

    #[tokio::test]
    async fn test_save_without_record_is_rejected() {
        let store = MemWorkflowStore::default();
        let mut session = WorkflowSession::new();
        session.status = WorkflowStatus::Review;

        let err = session.save(&store).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    // ── approve ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_approve_exports_and_persists_doc_refs() {
        let generator = StubGenerator::default();
        let exporter = RecordingExporter::default();
        let store = MemWorkflowStore::default();
        let mut session = armed_session();
        session.generate(&generator, &store).await.unwrap();

        let doc = session.approve(&exporter, &store).await.unwrap();

        assert_eq!(exporter.calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.status, WorkflowStatus::Approved);
        assert_eq!(session.doc_url.as_deref(), Some(doc.doc_url.as_str()));

        let row = store.row(session.workflow_id.unwrap());
        assert_eq!(row.status, "APPROVED");
        assert_eq!(row.google_doc_url.as_deref(), Some(doc.doc_url.as_str()));
        assert_eq!(row.google_doc_id.as_deref(), Some("test-doc"));
    }

    #[tokio::test]
    async fn test_approve_empty_post_is_rejected_without_export() {
        let generator = StubGenerator::default();
        let exporter = RecordingExporter::default();
        let store = MemWorkflowStore::default();
        let mut session = armed_session();
        session.generate(&generator, &store).await.unwrap();

        for cleared in ["", "   \n  "] {
            session.set_edited(cleared.to_string());
            let err = session.approve(&exporter, &store).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert_eq!(exporter.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.status, WorkflowStatus::Review);
    }

    #[tokio::test]
    async fn test_approve_outside_review_is_rejected() {
        let exporter = RecordingExporter::default();
        let store = MemWorkflowStore::default();
        let mut session = armed_session();

        assert!(session.approve(&exporter, &store).await.is_err());
        assert_eq!(exporter.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_approve_export_failure_stays_in_review() {
        let generator = StubGenerator::default();
        let exporter = FailingExporter::default();
        let store = MemWorkflowStore::default();
        let mut session = armed_session();
        session.generate(&generator, &store).await.unwrap();

        let err = session.approve(&exporter, &store).await.unwrap_err();
        assert!(matches!(err, AppError::Export(_)));
        assert_eq!(session.status, WorkflowStatus::Review);
        assert_eq!(session.doc_url, None);
        assert_eq!(store.row(session.workflow_id.unwrap()).status, "REVIEW");
    }

    #[tokio::test]
    async fn test_approve_persist_failure_keeps_review_but_remembers_doc() {
        let generator = StubGenerator::default();
        let exporter = RecordingExporter::default();
        let store = MemWorkflowStore::default();
        let mut session = armed_session();
        session.generate(&generator, &store).await.unwrap();

        store.fail_updates.store(true, Ordering::SeqCst);
        assert!(session.approve(&exporter, &store).await.is_err());

        // The document exists; the session keeps its references so nothing
        // is exported twice, but the approval did not go through.
        assert_eq!(session.status, WorkflowStatus::Review);
        assert!(session.doc_url.is_some());
        assert_eq!(exporter.calls.load(Ordering::SeqCst), 1);
    }

    // ── notification ────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_notification_full_path_reaches_notified() {
        let generator = StubGenerator::default();
        let exporter = RecordingExporter::default();
        let notifier = RecordingNotifier::default();
        let store = MemWorkflowStore::default();
        let mut session = armed_session();
        session.generate(&generator, &store).await.unwrap();
        session.approve(&exporter, &store).await.unwrap();

        let sent = session.send_notification(&notifier, &store).await.unwrap();

        assert!(sent);
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 1);
        assert_eq!(session.status, WorkflowStatus::Notified);
        assert_eq!(store.row(session.workflow_id.unwrap()).status, "NOTIFIED");
    }

    #[tokio::test]
    async fn test_notification_outside_approved_is_rejected() {
        let generator = StubGenerator::default();
        let notifier = RecordingNotifier::default();
        let store = MemWorkflowStore::default();
        let mut session = armed_session();
        session.generate(&generator, &store).await.unwrap();

        let err = session.send_notification(&notifier, &store).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_notification_without_doc_url_reports_not_sent() {
        let notifier = RecordingNotifier::default();
        let store = MemWorkflowStore::default();
        let mut session = armed_session();
        session.status = WorkflowStatus::Approved;
        session.doc_url = None;

        let sent = session.send_notification(&notifier, &store).await.unwrap();

        assert!(!sent);
        assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
        assert_eq!(session.status, WorkflowStatus::Approved);
    }

    #[tokio::test]
    async fn test_notification_provider_failure_keeps_approved() {
        let generator = StubGenerator::default();
        let exporter = RecordingExporter::default();
        let notifier = RecordingNotifier::default();
        let store = MemWorkflowStore::default();
        let mut session = armed_session();
        session.generate(&generator, &store).await.unwrap();
        session.approve(&exporter, &store).await.unwrap();

        notifier.succeed.store(false, Ordering::SeqCst);
        let sent = session.send_notification(&notifier, &store).await.unwrap();

        assert!(!sent);
        assert_eq!(session.status, WorkflowStatus::Approved);
        assert_eq!(store.row(session.workflow_id.unwrap()).status, "APPROVED");
    }

    #[tokio::test]
    async fn test_notification_persist_failure_keeps_approved() {
        let generator = StubGenerator::default();
        let exporter = RecordingExporter::default();
        let notifier = RecordingNotifier::default();
        let store = MemWorkflowStore::default();
        let mut session = armed_session();
        session.generate(&generator, &store).await.unwrap();
        session.approve(&exporter, &store).await.unwrap();

        store.fail_updates.store(true, Ordering::SeqCst);
        assert!(session.send_notification(&notifier, &store).await.is_err());
        assert_eq!(session.status, WorkflowStatus::Approved);
    }

    // ── reset ───────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_reset_clears_session_but_not_the_record() {
        let generator = StubGenerator::default();
        let exporter = RecordingExporter::default();
        let store = MemWorkflowStore::default();
        let mut session = armed_session();
        session.generate(&generator, &store).await.unwrap();
        session.approve(&exporter, &store).await.unwrap();
        let session_id = session.id;
        let workflow_id = session.workflow_id.unwrap();

        session.reset();

        assert_eq!(session.id, session_id);
        assert_eq!(session.status, WorkflowStatus::Draft);
        assert!(session.input_content.is_empty());
        assert!(session.employee.is_none());
        assert!(session.style_profile.is_none());
        assert_eq!(session.workflow_id, None);
        assert_eq!(session.doc_url, None);
        assert_eq!(store.row(workflow_id).status, "APPROVED");
    }

    // ── fuzz: the gates hold under arbitrary event sequences ────────────

    #[tokio::test]
    async fn test_fuzz_export_and_notify_only_fire_from_their_gates() {
        let mut rng = StdRng::seed_from_u64(0x5eed_cafe);

        for _ in 0..25 {
            let generator = StubGenerator::default();
            let exporter = RecordingExporter::default();
            let notifier = RecordingNotifier::default();
            let store = MemWorkflowStore::default();
            let mut session = armed_session();

            for step in 0..60 {
                let exports_before = exporter.calls.load(Ordering::SeqCst);
                let notifies_before = notifier.calls.load(Ordering::SeqCst);
                let status_before = session.status;

                match rng.random_range(0..9u8) {
                    0 => {
                        let _ = session.generate(&generator, &store).await;
                    }
                    1 => {
                        let _ = session.regenerate(&generator, &store).await;
                    }
                    2 => session.set_edited(format!("Bearbeitete Fassung {step}")),
                    3 => {
                        let _ = session.save(&store).await;
                    }
                    4 => {
                        let _ = session.approve(&exporter, &store).await;
                    }
                    5 => {
                        let _ = session.send_notification(&notifier, &store).await;
                    }
                    6 => {
                        // A reset user starting over: re-arm input and employee.
                        session.reset();
                        session.set_input(format!("Neues Thema {step}"));
                        let employee = employee_fixture();
                        let profile = profile_fixture(employee.id);
                        session.select_employee(employee, Some(profile));
                    }
                    7 => generator.fail_next.store(true, Ordering::SeqCst),
                    _ => session.set_input(format!("Anderes Thema {step}")),
                }

                if exporter.calls.load(Ordering::SeqCst) > exports_before {
                    assert_eq!(
                        status_before,
                        WorkflowStatus::Review,
                        "exporter fired outside the approval gate"
                    );
                }
                if notifier.calls.load(Ordering::SeqCst) > notifies_before {
                    assert_eq!(
                        status_before,
                        WorkflowStatus::Approved,
                        "notifier fired outside the notification gate"
                    );
                }
            }
        }
    }
}
