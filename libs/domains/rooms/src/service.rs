//! Room Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{RoomError, RoomResult};
use crate::models::{CreateRoom, Room, RoomDeleted, RoomSearch, RoomSearchResult, UpdateRoom};
use crate::repository::RoomRepository;

pub struct RoomService<R: RoomRepository> {
    repository: Arc<R>,
}

impl<R: RoomRepository> RoomService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a room after checking the number is free
    #[instrument(skip(self, input), fields(room_number = input.number))]
    pub async fn create_room(&self, input: CreateRoom) -> RoomResult<Room> {
        input
            .validate()
            .map_err(|e| RoomError::Validation(e.to_string()))?;

        if self.repository.exists_by_number(input.number).await? {
            return Err(RoomError::DuplicateNumber(input.number));
        }

        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get_room(&self, id: Uuid) -> RoomResult<Room> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(RoomError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_rooms(&self) -> RoomResult<Vec<Room>> {
        self.repository.list().await
    }

    #[instrument(skip(self))]
    pub async fn search_rooms(&self, search: RoomSearch) -> RoomResult<RoomSearchResult> {
        let criteria = search.criteria()?;
        let results = self.repository.search(criteria).await?;
        Ok(RoomSearchResult {
            count: results.len(),
            results,
        })
    }

    #[instrument(skip(self, input))]
    pub async fn update_room(&self, id: Uuid, input: UpdateRoom) -> RoomResult<Room> {
        input
            .validate()
            .map_err(|e| RoomError::Validation(e.to_string()))?;

        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(RoomError::NotFound(id))?;

        if let Some(number) = input.number {
            if number != existing.number && self.repository.exists_by_number(number).await? {
                return Err(RoomError::DuplicateNumber(number));
            }
        }

        self.repository.update(id, input).await
    }

    /// Set the availability flag from an untyped JSON value
    #[instrument(skip(self))]
    pub async fn set_availability(&self, id: Uuid, value: &serde_json::Value) -> RoomResult<Room> {
        let is_available = value
            .as_bool()
            .ok_or_else(|| RoomError::Validation("isAvailable must be a boolean".to_string()))?;

        self.repository
            .set_availability(id, is_available)
            .await?
            .ok_or(RoomError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete_room(&self, id: Uuid) -> RoomResult<RoomDeleted> {
        let room = self
            .repository
            .delete(id)
            .await?
            .ok_or(RoomError::NotFound(id))?;

        Ok(RoomDeleted {
            message: "Room deleted successfully".to_string(),
            room,
        })
    }
}
