//! # campus-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    AuthService, AuthSession, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    UserService,
};
