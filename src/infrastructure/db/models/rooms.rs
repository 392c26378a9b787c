use crate::domain::rooms::{Room, RoomError, RoomMember};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct RoomDbModel {
    pub id: Uuid,
    pub name: String,
    pub room_code: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, FromRow)]
pub struct RoomMemberDbModel {
    pub id: Uuid,
    pub auth_code: String,
    pub name: String,
    pub is_admin: bool,
    pub joined_at: OffsetDateTime,
}

impl From<RoomMemberDbModel> for RoomMember {
    fn from(model: RoomMemberDbModel) -> Self {
        Self {
            id: model.id,
            auth_code: model.auth_code,
            name: model.name,
            is_admin: model.is_admin,
            joined_at: model.joined_at,
        }
    }
}

impl RoomDbModel {
    /// Rehydrates the aggregate. `members` must already be in position order.
    pub fn into_room(self, members: Vec<RoomMemberDbModel>) -> Result<Room, RoomError> {
        Room::builder(self.name, self.room_code)
            .id(self.id)
            .timestamps(self.created_at, self.updated_at)
            .members(members.into_iter().map(RoomMember::from))
            .build()
    }
}
