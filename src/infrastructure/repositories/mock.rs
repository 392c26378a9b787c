use crate::domain::rooms::{Room, RoomRepository};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory room store. Records every `update` call and can be told to fail them.
#[derive(Clone, Default)]
pub struct MockRoomRepository {
    rooms: Arc<Mutex<Vec<Room>>>,
    updates: Arc<Mutex<Vec<Room>>>,
    update_failure: Option<String>,
    find_delay: Option<Duration>,
}

impl MockRoomRepository {
    pub fn with_rooms(rooms: impl IntoIterator<Item = Room>) -> Self {
        Self {
            rooms: Arc::new(Mutex::new(rooms.into_iter().collect())),
            ..Self::default()
        }
    }

    /// Every subsequent `update` fails with `message`
    pub fn failing_updates(mut self, message: impl Into<String>) -> Self {
        self.update_failure = Some(message.into());
        self
    }

    /// Lookups sleep for `delay` before answering
    pub fn with_find_delay(mut self, delay: Duration) -> Self {
        self.find_delay = Some(delay);
        self
    }

    /// Rooms passed to `update`, in call order
    pub fn updates(&self) -> Vec<Room> {
        self.updates.lock().unwrap().clone()
    }

    pub fn stored(&self, room_code: &str) -> Option<Room> {
        let rooms = self.rooms.lock().unwrap();
        rooms.iter().find(|r| r.room_code() == room_code).cloned()
    }

    async fn delay(&self) {
        if let Some(delay) = self.find_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl RoomRepository for MockRoomRepository {
    async fn find_by_member_auth_code(
        &self,
        auth_code: &str,
    ) -> Result<Option<Room>, anyhow::Error> {
        self.delay().await;
        let rooms = self.rooms.lock().unwrap();
        Ok(rooms
            .iter()
            .find(|r| r.find_member(auth_code).is_some())
            .cloned())
    }

    async fn find_by_room_code(&self, room_code: &str) -> Result<Option<Room>, anyhow::Error> {
        self.delay().await;
        Ok(self.stored(room_code))
    }

    async fn update(&self, room: &Room) -> Result<(), anyhow::Error> {
        self.updates.lock().unwrap().push(room.clone());

        if let Some(message) = &self.update_failure {
            return Err(anyhow::anyhow!("{}", message));
        }

        let mut rooms = self.rooms.lock().unwrap();
        match rooms.iter_mut().find(|r| r.id() == room.id()) {
            Some(stored) => *stored = room.clone(),
            None => return Err(anyhow::anyhow!("Room {} does not exist", room.id())),
        }
        Ok(())
    }
}
