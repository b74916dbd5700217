//! MongoDB implementation of RoomRepository

use async_trait::async_trait;
use database::mongodb::{is_duplicate_key, timestamp, uuid_bson};
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{RoomError, RoomResult};
use crate::models::{CreateRoom, Room, RoomCriteria, UpdateRoom};
use crate::repository::RoomRepository;

pub struct MongoRoomRepository {
    collection: Collection<Room>,
}

impl MongoRoomRepository {
    pub const COLLECTION: &'static str = "rooms";

    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Room>(Self::COLLECTION);
        Self { collection }
    }

    /// Create indexes; the unique room number index backs the duplicate check
    pub async fn init_indexes(&self) -> RoomResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "number": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_number_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "type": 1, "isAvailable": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_type_available".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "pricePerNight": 1 })
                .options(IndexOptions::builder().name("idx_price".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Room indexes created successfully");
        Ok(())
    }

    /// Build a MongoDB filter document from parsed search criteria
    fn build_filter(criteria: &RoomCriteria) -> Document {
        let mut filter = doc! {};

        if let Some(ref room_type) = criteria.room_type {
            filter.insert("type", room_type.as_str());
        }

        if let Some(is_available) = criteria.is_available {
            filter.insert("isAvailable", is_available);
        }

        if let Some(range) = Self::range(criteria.min_capacity, criteria.max_capacity) {
            filter.insert("capacity", range);
        }

        if let Some(range) = Self::range(criteria.min_price, criteria.max_price) {
            filter.insert("pricePerNight", range);
        }

        if !criteria.amenities.is_empty() {
            filter.insert("amenities", doc! { "$all": criteria.amenities.clone() });
        }

        filter
    }

    fn range(min: Option<f64>, max: Option<f64>) -> Option<Document> {
        if min.is_none() && max.is_none() {
            return None;
        }
        let mut range = doc! {};
        if let Some(min) = min {
            range.insert("$gte", min);
        }
        if let Some(max) = max {
            range.insert("$lte", max);
        }
        Some(range)
    }

    fn write_error(err: mongodb::error::Error, number: i32) -> RoomError {
        if is_duplicate_key(&err) {
            RoomError::DuplicateNumber(number)
        } else {
            err.into()
        }
    }

    async fn find_sorted(&self, filter: Document, sort: Document) -> RoomResult<Vec<Room>> {
        let options = FindOptions::builder().sort(sort).build();
        let cursor = self.collection.find(filter).with_options(options).await?;
        let rooms: Vec<Room> = cursor.try_collect().await?;
        Ok(rooms)
    }
}

#[async_trait]
impl RoomRepository for MongoRoomRepository {
    #[instrument(skip(self, input), fields(room_number = input.number))]
    async fn create(&self, input: CreateRoom) -> RoomResult<Room> {
        let room = Room::new(input);

        self.collection
            .insert_one(&room)
            .await
            .map_err(|e| Self::write_error(e, room.number))?;

        tracing::info!(room_id = %room.id, room_number = room.number, "Room created successfully");
        Ok(room)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> RoomResult<Option<Room>> {
        let room = self.collection.find_one(doc! { "_id": uuid_bson(&id) }).await?;
        Ok(room)
    }

    #[instrument(skip(self))]
    async fn get_by_number(&self, number: i32) -> RoomResult<Option<Room>> {
        let room = self.collection.find_one(doc! { "number": number }).await?;
        Ok(room)
    }

    #[instrument(skip(self))]
    async fn list(&self) -> RoomResult<Vec<Room>> {
        self.find_sorted(doc! {}, doc! { "number": 1 }).await
    }

    #[instrument(skip(self))]
    async fn search(&self, criteria: RoomCriteria) -> RoomResult<Vec<Room>> {
        let filter = Self::build_filter(&criteria);
        let mut sort = Document::new();
        sort.insert(criteria.sort_field.as_str(), criteria.sort_direction);
        self.find_sorted(filter, sort).await
    }

    #[instrument(skip(self))]
    async fn list_excluding_numbers(&self, numbers: Vec<i32>) -> RoomResult<Vec<Room>> {
        self.find_sorted(doc! { "number": { "$nin": numbers } }, doc! { "number": 1 })
            .await
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateRoom) -> RoomResult<Room> {
        let filter = doc! { "_id": uuid_bson(&id) };
        let mut room = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(RoomError::NotFound(id))?;

        room.apply_update(input);

        self.collection
            .replace_one(filter, &room)
            .await
            .map_err(|e| Self::write_error(e, room.number))?;

        tracing::info!(room_id = %id, "Room updated successfully");
        Ok(room)
    }

    #[instrument(skip(self))]
    async fn set_availability(&self, id: Uuid, is_available: bool) -> RoomResult<Option<Room>> {
        let update = doc! {
            "$set": {
                "isAvailable": is_available,
                "updatedAt": timestamp::format(&chrono::Utc::now()),
            }
        };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let room = self
            .collection
            .find_one_and_update(doc! { "_id": uuid_bson(&id) }, update)
            .with_options(options)
            .await?;

        if room.is_some() {
            tracing::info!(room_id = %id, is_available, "Room availability updated");
        }
        Ok(room)
    }

    #[instrument(skip(self))]
    async fn set_availability_by_number(
        &self,
        number: i32,
        is_available: bool,
    ) -> RoomResult<bool> {
        let update = doc! {
            "$set": {
                "isAvailable": is_available,
                "updatedAt": timestamp::format(&chrono::Utc::now()),
            }
        };
        let result = self
            .collection
            .update_one(doc! { "number": number }, update)
            .await?;

        tracing::info!(room_number = number, is_available, "Room availability updated");
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> RoomResult<Option<Room>> {
        let room = self
            .collection
            .find_one_and_delete(doc! { "_id": uuid_bson(&id) })
            .await?;

        if room.is_some() {
            tracing::info!(room_id = %id, "Room deleted successfully");
        }
        Ok(room)
    }

    #[instrument(skip(self))]
    async fn exists_by_number(&self, number: i32) -> RoomResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "number": number })
            .await?;
        Ok(count > 0)
    }

    #[instrument(skip(self))]
    async fn count(&self) -> RoomResult<u64> {
        let count = self.collection.count_documents(doc! {}).await?;
        Ok(count)
    }
}
