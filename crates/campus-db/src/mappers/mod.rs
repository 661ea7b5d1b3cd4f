//! Model to entity mappers
//!
//! Conversions from database rows to domain objects. The user mapping is
//! fallible because the stored role string must parse into `UserRole`.

mod refresh_token;
mod user;

pub use user::user_from_model;
