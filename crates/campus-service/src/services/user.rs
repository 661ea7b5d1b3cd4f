//! User profile service

use campus_core::{User, UserProfileUpdate};
use tracing::{info, instrument};

use crate::dto::{is_valid_whatsapp_number, UpdateProfileRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// User profile service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fetch a user's profile
    #[instrument(skip(self))]
    pub async fn get_profile(&self, id: i64) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", id.to_string()))
    }

    /// Update profile fields and return the refreshed profile
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        id: i64,
        request: UpdateProfileRequest,
    ) -> ServiceResult<User> {
        if let Some(number) = &request.whatsapp_number {
            if !is_valid_whatsapp_number(number) {
                return Err(ServiceError::validation(
                    "WhatsApp number must be in international format (+ followed by 8-15 digits)",
                ));
            }
        }

        let update = UserProfileUpdate {
            first_name: request.first_name,
            last_name: request.last_name,
            age: request.age,
            is_employed: request.is_employed,
            whatsapp_number: request.whatsapp_number,
        };

        self.ctx.user_repo().update_profile(id, &update).await?;

        info!(user_id = id, "Profile updated");

        self.get_profile(id).await
    }

    /// Delete an account; the ledger rows cascade away with it
    #[instrument(skip(self))]
    pub async fn delete_account(&self, id: i64) -> ServiceResult<()> {
        self.ctx.user_repo().delete(id).await?;

        info!(user_id = id, "Account deleted");

        Ok(())
    }
}
