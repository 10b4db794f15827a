//! HTTP handlers, grouped by resource.

pub mod projects;
pub mod prompts;
