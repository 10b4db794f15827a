//! Domain types, errors, and validation shared across the promptstudio crates.
//!
//! This crate is I/O-free: everything here is pure logic so it can be unit
//! tested without a database or HTTP server.

pub mod error;
pub mod projects;
pub mod prompts;
pub mod types;
