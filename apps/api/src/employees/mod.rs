// Employee management: CRUD plus the sample-text upload that feeds style
// analysis.

pub mod handlers;
pub mod store;
