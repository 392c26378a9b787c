use crate::domain::rooms::{RoomError, RoomMember, RoomRepository};
use crate::shared::error::{
    FIELD_AUTH_CODE, FIELD_ROOM_CODE, ValidationError, ValidationErrorKind,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;
use validator::{Validate, ValidationError as RuleViolation};

fn not_blank(name: &str) -> Result<(), RuleViolation> {
    if name.trim().is_empty() {
        let mut violation = RuleViolation::new("blank");
        violation.message = Some("Name must not be blank".into());
        return Err(violation);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct JoinRoomRequest {
    #[validate(
        length(max = 40, message = "Name must be at most 40 characters"),
        custom(function = "not_blank")
    )]
    #[schema(example = "Alice", min_length = 1, max_length = 40)]
    pub name: String,
}

pub struct JoinRoomUseCase {
    repo: Arc<dyn RoomRepository>,
}

impl JoinRoomUseCase {
    pub fn new(repo: Arc<dyn RoomRepository>) -> Self {
        Self { repo }
    }

    /// Adds a new non-admin member to the room with the given join code
    #[tracing::instrument(skip(self, req))]
    pub async fn execute(
        &self,
        room_code: &str,
        req: JoinRoomRequest,
    ) -> Result<RoomMember, ValidationError> {
        let room = self
            .repo
            .find_by_room_code(room_code)
            .await
            .map_err(|e| ValidationError::persistence(&e))?
            .ok_or_else(|| ValidationError::room_not_found(FIELD_ROOM_CODE))?;

        let member = RoomMember::new(req.name.trim());
        let room = room.add_member(member.clone()).map_err(|e| match e {
            RoomError::DuplicateMember => ValidationError::new(
                ValidationErrorKind::AlreadyMember,
                FIELD_AUTH_CODE,
                e.to_string(),
            ),
            RoomError::MemberNotFound => ValidationError::new(
                ValidationErrorKind::UserNotFound,
                FIELD_AUTH_CODE,
                e.to_string(),
            ),
        })?;

        self.repo.update(&room).await.map_err(|e| {
            tracing::error!(room_id = %room.id(), "Failed to persist room: {:?}", e);
            ValidationError::persistence(&e)
        })?;

        tracing::info!(room_id = %room.id(), member_id = %member.id, "Member joined room");
        Ok(member)
    }
}
