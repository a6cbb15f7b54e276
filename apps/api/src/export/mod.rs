// Document export: turns an approved post into a Google Doc in the
// employee's Drive folder.

pub mod google;

// Re-export the public API consumed by the workflow machine.
pub use google::{DocumentExporter, ExportedDoc, GoogleDocsExporter, GoogleSession};
