//! Per-contact conversation threads.
//!
//! Messages are append-only and always belong to one contact. Reads come back
//! ordered by timestamp, ties broken by insertion order.
//!
//! - Domain types in [`domain`]
//! - The store port in [`ports`]
//! - In-memory and `SQLite` stores in [`adapters`]
//! - The [`MessageRepository`](services::MessageRepository) façade in
//!   [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
