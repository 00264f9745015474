use crate::error::TableError;
use crate::ledger::Archive;
use crate::ledger::Ledger;
use crate::ledger::Member;
use crate::room::Room;
use crate::room::RoomHandle;
use crate::table::TableConfig;
use crate::timer::TimerConfig;
use cardroom_core::ID;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Tracks every open room. Rooms never talk to each other; the lobby
/// only hands out [`RoomHandle`]s and tears rooms down.
#[derive(Default)]
pub struct Lobby {
    rooms: RwLock<HashMap<ID<Room>, RoomHandle>>,
}

impl Lobby {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a room and spawns its task.
    pub async fn open(
        &self,
        config: TableConfig,
        timer: TimerConfig,
        ledger: Arc<dyn Ledger>,
        archive: Arc<dyn Archive>,
    ) -> RoomHandle {
        let handle = Room::spawn(config, timer, ledger, archive);
        log::info!("[lobby] opened room {}", handle.id());
        self.rooms.write().await.insert(handle.id(), handle.clone());
        handle
    }

    pub async fn room(&self, id: ID<Room>) -> Result<RoomHandle, TableError> {
        self.rooms
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(TableError::RoomClosed)
    }

    /// Shuts a room down and forgets it. The room task enforces the
    /// creator rule, refuses mid-hand, and cashes every seat out to the
    /// ledger on its way out.
    pub async fn close(&self, id: ID<Room>, by: Option<ID<Member>>) -> Result<(), TableError> {
        let handle = self.room(id).await?;
        handle.close(by).await?;
        self.rooms.write().await.remove(&id);
        log::info!("[lobby] closed room {}", id);
        Ok(())
    }

    pub async fn ids(&self) -> Vec<ID<Room>> {
        self.rooms.read().await.keys().copied().collect()
    }
}
