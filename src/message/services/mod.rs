//! Application services for conversation messages.

mod repository;

pub use repository::MessageRepository;
