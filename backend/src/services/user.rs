//! Profile updates for the signed-in account

use crate::error::ApiError;
use crate::repositories::AccountStore;
use taskboard_shared::validation::validate_update_user;
use taskboard_shared::{AuthError, PublicUser, UpdateUserRequest};

/// User service for profile operations
pub struct UserService;

impl UserService {
    /// Update the nick name of an account
    pub async fn update(
        accounts: &dyn AccountStore,
        user_id: i32,
        req: UpdateUserRequest,
    ) -> Result<PublicUser, ApiError> {
        validate_update_user(&req)?;

        // The account can vanish between authentication and the update
        accounts
            .update_nick_name(user_id, req.nick_name)
            .await?
            .ok_or_else(|| AuthError::Unauthenticated.into())
    }
}
