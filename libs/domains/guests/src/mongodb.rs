//! MongoDB implementation of GuestRepository

use async_trait::async_trait;
use axum_helpers::{Pagination, is_ascending};
use database::mongodb::{is_duplicate_key, uuid_array, uuid_bson};
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{GuestError, GuestResult};
use crate::models::{Guest, GuestFilter, NewGuest, UpdateGuest};
use crate::repository::GuestRepository;

pub struct MongoGuestRepository {
    collection: Collection<Guest>,
}

impl MongoGuestRepository {
    pub const COLLECTION: &'static str = "guests";

    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Guest>(Self::COLLECTION);
        Self { collection }
    }

    pub async fn init_indexes(&self) -> GuestResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_email_unique".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "phone": 1 })
                .options(IndexOptions::builder().name("idx_phone".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "documentType": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_document_type".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "lastName": 1, "firstName": 1 })
                .options(IndexOptions::builder().name("idx_name".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Guest indexes created successfully");
        Ok(())
    }

    /// Build a MongoDB filter document from GuestFilter.
    ///
    /// The search text is escaped so it only ever matches literally.
    fn build_filter(filter: &GuestFilter) -> Document {
        let mut doc = doc! {};

        if let Some(document_type) = filter.document_type.as_deref().filter(|t| !t.is_empty()) {
            doc.insert("documentType", document_type);
        }

        if let Some(search) = filter.search_text() {
            let pattern = regex::escape(search);
            doc.insert(
                "$or",
                ["firstName", "lastName", "email", "phone"]
                    .iter()
                    .map(|field| {
                        let mut clause = Document::new();
                        clause.insert(*field, doc! { "$regex": pattern.as_str(), "$options": "i" });
                        clause
                    })
                    .collect::<Vec<_>>(),
            );
        }

        doc
    }
}

#[async_trait]
impl GuestRepository for MongoGuestRepository {
    #[instrument(skip(self, input))]
    async fn create(&self, input: NewGuest) -> GuestResult<Guest> {
        let guest = Guest::new(input);

        self.collection.insert_one(&guest).await.map_err(|e| {
            if is_duplicate_key(&e) {
                GuestError::DuplicateEmail(guest.email.clone())
            } else {
                e.into()
            }
        })?;

        tracing::info!(guest_id = %guest.id, "Guest created successfully");
        Ok(guest)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> GuestResult<Option<Guest>> {
        let guest = self.collection.find_one(doc! { "_id": uuid_bson(&id) }).await?;
        Ok(guest)
    }

    #[instrument(skip(self))]
    async fn get_by_ids(&self, ids: Vec<Uuid>) -> GuestResult<Vec<Guest>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": uuid_array(&ids) } })
            .await?;
        let guests: Vec<Guest> = cursor.try_collect().await?;
        Ok(guests)
    }

    #[instrument(skip(self))]
    async fn list(&self, filter: GuestFilter, pagination: Pagination) -> GuestResult<Vec<Guest>> {
        let mongo_filter = Self::build_filter(&filter);

        let mut sort = Document::new();
        sort.insert(
            filter.sort_field(),
            if is_ascending(filter.order.as_deref()) { 1 } else { -1 },
        );

        let options = FindOptions::builder()
            .limit(pagination.limit_i64())
            .skip(pagination.skip())
            .sort(sort)
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let guests: Vec<Guest> = cursor.try_collect().await?;

        Ok(guests)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: GuestFilter) -> GuestResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(&filter))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateGuest) -> GuestResult<Guest> {
        let filter = doc! { "_id": uuid_bson(&id) };
        let mut guest = self
            .collection
            .find_one(filter.clone())
            .await?
            .ok_or(GuestError::NotFound(id))?;

        guest.apply_update(input);

        self.collection
            .replace_one(filter, &guest)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    GuestError::EmailTaken(guest.email.clone())
                } else {
                    e.into()
                }
            })?;

        tracing::info!(guest_id = %id, "Guest updated successfully");
        Ok(guest)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> GuestResult<bool> {
        let result = self
            .collection
            .delete_one(doc! { "_id": uuid_bson(&id) })
            .await?;

        if result.deleted_count == 0 {
            return Ok(false);
        }

        tracing::info!(guest_id = %id, "Guest deleted successfully");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn email_taken(&self, email: String, exclude: Option<Uuid>) -> GuestResult<bool> {
        let mut filter = doc! { "email": email };
        if let Some(id) = exclude {
            filter.insert("_id", doc! { "$ne": uuid_bson(&id) });
        }

        let count = self.collection.count_documents(filter).await?;
        Ok(count > 0)
    }
}
