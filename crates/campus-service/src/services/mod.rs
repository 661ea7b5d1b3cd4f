//! Business logic services

mod auth;
mod context;
mod error;
mod user;

pub use auth::{AuthService, AuthSession};
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use user::UserService;
