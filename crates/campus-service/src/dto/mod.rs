//! Data transfer objects for the HTTP surface

mod requests;
mod responses;

pub use requests::{
    is_valid_whatsapp_number, CreateAdminRequest, LoginRequest, SignupRequest, UpdateProfileRequest,
};
pub use responses::{
    AccessTokenResponse, AuthSuccessResponse, DataResponse, MessageResponse, UserResponse,
};
