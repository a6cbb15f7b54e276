pub mod employee;
pub mod style_profile;
pub mod workflow;
