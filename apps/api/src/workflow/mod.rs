// The post workflow: an in-memory session driven through
// DRAFT → GENERATING → REVIEW → APPROVED → NOTIFIED by explicit user events,
// persisted lazily to the workflows table.

pub mod handlers;
pub mod machine;
pub mod registry;
pub mod store;

// Re-export the public API consumed by handlers and main.
pub use machine::WorkflowSession;
pub use registry::SessionRegistry;
pub use store::{PgWorkflowStore, WorkflowPatch, WorkflowStore};
