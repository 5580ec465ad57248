//! Application services for contacts.

mod repository;

pub use repository::ContactRepository;
