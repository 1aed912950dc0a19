//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{account::LinkedAccount, account::Provider, session::Session};
pub use repository::{AccountRepository, SessionRepository, UserRepository};
pub use value_object::username::Username;
