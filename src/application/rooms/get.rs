use crate::domain::rooms::{Room, RoomRepository};
use crate::shared::error::{FIELD_USER_CODE, ValidationError};
use std::sync::Arc;

pub struct GetRoomUseCase {
    repo: Arc<dyn RoomRepository>,
}

impl GetRoomUseCase {
    pub fn new(repo: Arc<dyn RoomRepository>) -> Self {
        Self { repo }
    }

    #[tracing::instrument(skip_all)]
    pub async fn execute(&self, user_code: &str) -> Result<Room, ValidationError> {
        self.repo
            .find_by_member_auth_code(user_code)
            .await
            .map_err(|e| ValidationError::persistence(&e))?
            .ok_or_else(|| ValidationError::room_not_found(FIELD_USER_CODE))
    }
}
