//! Contact management.
//!
//! Contacts are the people a conversation belongs to. The module follows
//! hexagonal architecture:
//!
//! - Domain types and input helpers in [`domain`]
//! - The store port in [`ports`]
//! - In-memory and `SQLite` stores in [`adapters`]
//! - The [`ContactRepository`](services::ContactRepository) façade in
//!   [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
