//! Shared plumbing: connection handling, schema, errors, store resolution.

pub mod db;
pub mod error;
pub mod schemas;
pub mod store;
