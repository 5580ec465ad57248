//! Hangouts: local persistence and conversation threading for a contacts and
//! SMS application.
//!
//! The crate stores contacts and their per-contact message threads, exposes
//! them through repositories with a single failure type and live snapshot
//! streams, and files inbound SMS under the matching contact, creating one
//! when the sender is unknown.
//!
//! # Architecture
//!
//! Each feature module follows hexagonal architecture:
//!
//! - **Domain**: value types with no storage dependencies
//! - **Ports**: store traits the repositories depend on
//! - **Adapters**: in-memory and `SQLite` implementations of the ports
//! - **Services**: repositories translating store failures into
//!   [`error::RepositoryError`]
//!
//! # Modules
//!
//! - [`contact`]: contacts and the contact repository
//! - [`message`]: conversation messages and the message repository
//! - [`inbound`]: inbound SMS matching and the background dispatcher
//! - [`storage`]: shared database handles, store errors, and live queries
//! - [`avatar`]: avatar image files
//! - [`config`] and [`logging`]: process setup

pub mod avatar;
pub mod config;
pub mod contact;
pub mod error;
pub mod inbound;
pub mod logging;
pub mod message;
pub mod storage;
