use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// A member of a room. Authenticates with its authorization code instead of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomMember {
    pub id: Uuid,
    pub auth_code: String,
    pub name: String,
    pub is_admin: bool,
    pub joined_at: OffsetDateTime,
}

impl RoomMember {
    /// New non-admin member with a freshly generated authorization code
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            auth_code: Uuid::new_v4().simple().to_string(),
            name: name.into(),
            is_admin: false,
            joined_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn with_auth_code(mut self, auth_code: impl Into<String>) -> Self {
        self.auth_code = auth_code.into();
        self
    }

    pub fn as_admin(mut self) -> Self {
        self.is_admin = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("User not found in this room.")]
    MemberNotFound,
    #[error("User is already a member of this room.")]
    DuplicateMember,
}

/// Room aggregate. The member list is only changed through the aggregate's own methods.
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    id: Uuid,
    name: String,
    room_code: String,
    members: Vec<RoomMember>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl Room {
    pub fn builder(name: impl Into<String>, room_code: impl Into<String>) -> RoomBuilder {
        RoomBuilder::new(name, room_code)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn room_code(&self) -> &str {
        &self.room_code
    }

    pub fn members(&self) -> &[RoomMember] {
        &self.members
    }

    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }

    pub fn updated_at(&self) -> OffsetDateTime {
        self.updated_at
    }

    pub fn find_member(&self, auth_code: &str) -> Option<&RoomMember> {
        self.members.iter().find(|m| m.auth_code == auth_code)
    }

    /// Appends a member, keeping authorization codes unique within the room.
    pub fn add_member(mut self, member: RoomMember) -> Result<Room, RoomError> {
        if self.find_member(&member.auth_code).is_some() {
            return Err(RoomError::DuplicateMember);
        }
        self.members.push(member);
        self.updated_at = OffsetDateTime::now_utc();
        Ok(self)
    }

    /// Removes the member with the given code. Remaining members keep their order.
    pub fn remove_member(mut self, auth_code: &str) -> Result<Room, RoomError> {
        let index = self
            .members
            .iter()
            .position(|m| m.auth_code == auth_code)
            .ok_or(RoomError::MemberNotFound)?;
        self.members.remove(index);
        self.updated_at = OffsetDateTime::now_utc();
        Ok(self)
    }
}

/// Builds a [`Room`] from its parts. Used when loading rooms from storage and in fixtures.
#[derive(Debug, Clone)]
pub struct RoomBuilder {
    id: Uuid,
    name: String,
    room_code: String,
    members: Vec<RoomMember>,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl RoomBuilder {
    pub fn new(name: impl Into<String>, room_code: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            room_code: room_code.into(),
            members: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn timestamps(mut self, created_at: OffsetDateTime, updated_at: OffsetDateTime) -> Self {
        self.created_at = created_at;
        self.updated_at = updated_at;
        self
    }

    pub fn member(mut self, member: RoomMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn members(mut self, members: impl IntoIterator<Item = RoomMember>) -> Self {
        self.members.extend(members);
        self
    }

    pub fn build(self) -> Result<Room, RoomError> {
        for (i, member) in self.members.iter().enumerate() {
            if self.members[..i]
                .iter()
                .any(|m| m.auth_code == member.auth_code)
            {
                return Err(RoomError::DuplicateMember);
            }
        }

        Ok(Room {
            id: self.id,
            name: self.name,
            room_code: self.room_code,
            members: self.members,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// The room one of whose members holds `auth_code`. Codes address at most one room.
    async fn find_by_member_auth_code(
        &self,
        auth_code: &str,
    ) -> Result<Option<Room>, anyhow::Error>;
    async fn find_by_room_code(&self, room_code: &str) -> Result<Option<Room>, anyhow::Error>;
    /// Persists the room's current member list, replacing the stored one.
    async fn update(&self, room: &Room) -> Result<(), anyhow::Error>;
}
