use async_trait::async_trait;
use uuid::Uuid;

use crate::error::RoomResult;
use crate::models::{CreateRoom, Room, RoomCriteria, UpdateRoom};

/// Repository trait for Room persistence
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Create a new room
    async fn create(&self, input: CreateRoom) -> RoomResult<Room>;

    async fn get_by_id(&self, id: Uuid) -> RoomResult<Option<Room>>;

    async fn get_by_number(&self, number: i32) -> RoomResult<Option<Room>>;

    /// All rooms ordered by number
    async fn list(&self) -> RoomResult<Vec<Room>>;

    /// Rooms matching the search filters, in the requested order
    async fn search(&self, criteria: RoomCriteria) -> RoomResult<Vec<Room>>;

    /// Rooms whose number is not in `numbers`, ordered by number
    async fn list_excluding_numbers(&self, numbers: Vec<i32>) -> RoomResult<Vec<Room>>;

    /// Update an existing room
    async fn update(&self, id: Uuid, input: UpdateRoom) -> RoomResult<Room>;

    /// Set the availability flag; `None` when the room does not exist
    async fn set_availability(&self, id: Uuid, is_available: bool) -> RoomResult<Option<Room>>;

    /// Set the availability flag by room number; `false` when no room matched
    async fn set_availability_by_number(&self, number: i32, is_available: bool)
        -> RoomResult<bool>;

    /// Delete a room, returning the removed document
    async fn delete(&self, id: Uuid) -> RoomResult<Option<Room>>;

    async fn exists_by_number(&self, number: i32) -> RoomResult<bool>;

    async fn count(&self) -> RoomResult<u64>;
}
