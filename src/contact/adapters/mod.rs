//! Persistence adapters for the contact module.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryContactStore`]: over the shared in-memory database,
//!   for tests and previews
//! - [`sqlite::SqliteContactStore`]: `SQLite` persistence using Diesel ORM

pub mod memory;
pub mod sqlite;
