// Employee notification: one templated email per approved post, pointing at
// the exported document.

pub mod mailer;
pub mod template;

use async_trait::async_trait;

use crate::models::employee::EmployeeRow;

/// Tells an employee their post is ready.
///
/// Returns a success flag and never errors: a provider failure is logged and
/// reported as `false`, and the workflow stays where it was. Carried in
/// `AppState` as `Arc<dyn EmployeeNotifier>`; the backend is picked once at
/// startup (SendGrid when configured, log-only otherwise).
#[async_trait]
pub trait EmployeeNotifier: Send + Sync {
    async fn notify(&self, employee: &EmployeeRow, doc_url: &str) -> bool;
}

pub use mailer::{LogOnlyNotifier, SendGridNotifier};
