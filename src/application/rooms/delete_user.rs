use crate::domain::rooms::RoomRepository;
use crate::shared::error::{
    FIELD_ADMIN_CODE, FIELD_TARGET_USER_CODE, ValidationError, ValidationErrorKind,
};
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DeleteUserCommand {
    pub target_user_code: String,
    pub admin_code: String,
}

impl DeleteUserCommand {
    pub fn new(target_user_code: impl Into<String>, admin_code: impl Into<String>) -> Self {
        Self {
            target_user_code: target_user_code.into(),
            admin_code: admin_code.into(),
        }
    }
}

/// Removes a member from a room on behalf of one of the room's admins
pub struct DeleteUserUseCase {
    repo: Arc<dyn RoomRepository>,
}

impl DeleteUserUseCase {
    pub fn new(repo: Arc<dyn RoomRepository>) -> Self {
        Self { repo }
    }

    /// A lookup that finds no room fails with `RoomNotFound` on `adminCode`. A lookup that
    /// errors fails with `PersistenceError` on `room`, carrying the repository's message.
    ///
    /// Dropping the returned future before the lookup resolves leaves the store untouched.
    #[tracing::instrument(skip_all)]
    pub async fn execute(&self, command: DeleteUserCommand) -> Result<(), ValidationError> {
        let room = self
            .repo
            .find_by_member_auth_code(&command.admin_code)
            .await
            .map_err(|e| {
                tracing::error!("Room lookup failed: {:?}", e);
                ValidationError::persistence(&e)
            })?
            .ok_or_else(|| {
                tracing::info!("No room for the given admin code");
                ValidationError::room_not_found(FIELD_ADMIN_CODE)
            })?;

        // The lookup contract says the admin is a member, but the store is outside our control.
        let admin = room.find_member(&command.admin_code).ok_or_else(|| {
            tracing::warn!(room_id = %room.id(), "Room returned without the requesting admin");
            ValidationError::new(
                ValidationErrorKind::AdminNotFound,
                FIELD_ADMIN_CODE,
                "Admin not found in this room.",
            )
        })?;

        if !admin.is_admin {
            tracing::info!(room_id = %room.id(), member_id = %admin.id, "Non-admin tried to delete a user");
            return Err(ValidationError::new(
                ValidationErrorKind::NotAuthorized,
                FIELD_ADMIN_CODE,
                "Only admin can delete users.",
            ));
        }

        let room_id = room.id();
        let room = room
            .remove_member(&command.target_user_code)
            .map_err(|e| {
                ValidationError::new(
                    ValidationErrorKind::UserNotFound,
                    FIELD_TARGET_USER_CODE,
                    e.to_string(),
                )
            })?;

        self.repo.update(&room).await.map_err(|e| {
            tracing::error!(room_id = %room_id, "Failed to persist room: {:?}", e);
            ValidationError::persistence(&e)
        })?;

        tracing::info!(room_id = %room_id, "User removed from room");
        Ok(())
    }
}
