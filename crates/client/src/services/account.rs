//! Profile reads and updates.

use kiogloss_core::UserId;

use crate::api::Gateway;
use crate::error::ApiError;
use crate::models::account::{UserDetail, UserUpdateRequest};

#[derive(Clone)]
pub struct AccountService {
    gateway: Gateway,
}

impl AccountService {
    #[must_use]
    pub fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    /// The user's profile, including the nested account record.
    pub async fn user_detail(&self, user: UserId) -> Result<UserDetail, ApiError> {
        self.gateway.get(&format!("/user/{user}")).await
    }

    /// Partially update the profile; unset fields stay as they were.
    pub async fn update_user(
        &self,
        user: UserId,
        request: &UserUpdateRequest,
    ) -> Result<(), ApiError> {
        self.gateway
            .patch_unit(&format!("/user/update/{user}"), request)
            .await
    }
}
