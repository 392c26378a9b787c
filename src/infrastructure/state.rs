use crate::domain::rooms::RoomRepository;
use crate::infrastructure::db::DbPool;
use crate::infrastructure::repositories::rooms::PostgresRoomRepository;
use axum::extract::FromRef;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub rooms: Arc<dyn RoomRepository>,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        let rooms = Arc::new(PostgresRoomRepository::new(pool.clone()));
        Self { pool, rooms }
    }

    /// State with a custom room store, e.g. the in-memory one
    pub fn with_repository(pool: DbPool, rooms: Arc<dyn RoomRepository>) -> Self {
        Self { pool, rooms }
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}
