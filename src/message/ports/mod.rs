//! Port contracts for message persistence.

pub mod store;

pub use store::MessageStore;

#[cfg(test)]
pub use store::MockMessageStore;
