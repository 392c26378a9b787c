use crate::domain::rooms::{Room, RoomRepository};
use crate::infrastructure::db::DbPool;
use crate::infrastructure::db::models::rooms::{RoomDbModel, RoomMemberDbModel};
use async_trait::async_trait;
use uuid::Uuid;

/// Member order as stored in `room_members.position`
fn position_column(index: usize) -> Result<i32, anyhow::Error> {
    i32::try_from(index).map_err(|_| anyhow::anyhow!("Member position {} out of range", index))
}

#[derive(Clone)]
pub struct PostgresRoomRepository {
    pool: DbPool,
}

impl PostgresRoomRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn load_members(&self, room_id: Uuid) -> Result<Vec<RoomMemberDbModel>, sqlx::Error> {
        sqlx::query_as::<_, RoomMemberDbModel>(
            r#"
            SELECT id, auth_code, name, is_admin, joined_at
            FROM room_members
            WHERE room_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn hydrate(&self, row: Option<RoomDbModel>) -> Result<Option<Room>, anyhow::Error> {
        let Some(row) = row else {
            return Ok(None);
        };

        let members = self.load_members(row.id).await?;
        Ok(Some(row.into_room(members)?))
    }
}

#[async_trait]
impl RoomRepository for PostgresRoomRepository {
    #[tracing::instrument(skip_all)]
    async fn find_by_member_auth_code(
        &self,
        auth_code: &str,
    ) -> Result<Option<Room>, anyhow::Error> {
        let row = sqlx::query_as::<_, RoomDbModel>(
            r#"
            SELECT r.id, r.name, r.room_code, r.created_at, r.updated_at
            FROM rooms r
            INNER JOIN room_members m ON m.room_id = r.id
            WHERE m.auth_code = $1
            "#,
        )
        .bind(auth_code)
        .fetch_optional(&self.pool)
        .await?;

        self.hydrate(row).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_by_room_code(&self, room_code: &str) -> Result<Option<Room>, anyhow::Error> {
        let row = sqlx::query_as::<_, RoomDbModel>(
            r#"
            SELECT id, name, room_code, created_at, updated_at
            FROM rooms
            WHERE room_code = $1
            "#,
        )
        .bind(room_code)
        .fetch_optional(&self.pool)
        .await?;

        self.hydrate(row).await
    }

    #[tracing::instrument(skip(self, room), fields(room_id = %room.id()))]
    async fn update(&self, room: &Room) -> Result<(), anyhow::Error> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE rooms SET name = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(room.id())
        .bind(room.name())
        .bind(room.updated_at())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(anyhow::anyhow!("Room {} no longer exists", room.id()));
        }

        let member_ids: Vec<Uuid> = room.members().iter().map(|m| m.id).collect();

        sqlx::query(
            r#"
            DELETE FROM room_members
            WHERE room_id = $1 AND NOT (id = ANY($2))
            "#,
        )
        .bind(room.id())
        .bind(&member_ids)
        .execute(&mut *tx)
        .await?;

        for (position, member) in room.members().iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO room_members (id, room_id, auth_code, name, is_admin, position, joined_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ON CONFLICT (id) DO UPDATE
                SET name = EXCLUDED.name,
                    is_admin = EXCLUDED.is_admin,
                    position = EXCLUDED.position
                "#,
            )
            .bind(member.id)
            .bind(room.id())
            .bind(&member.auth_code)
            .bind(&member.name)
            .bind(member.is_admin)
            .bind(position_column(position)?)
            .bind(member.joined_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }
}
