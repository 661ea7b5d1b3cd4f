//! # campus-core
//!
//! Domain layer containing entities, domain errors, and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;

// Re-export commonly used types at crate root
pub use entities::{RefreshTokenRecord, User, UserRole};
pub use error::DomainError;
pub use traits::{NewUser, RefreshTokenRepository, RepoResult, UserProfileUpdate, UserRepository};
