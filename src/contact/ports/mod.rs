//! Port contracts for contact persistence.

pub mod store;

pub use store::ContactStore;

#[cfg(test)]
pub use store::MockContactStore;
