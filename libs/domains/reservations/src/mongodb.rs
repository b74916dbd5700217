//! MongoDB implementation of ReservationRepository

use async_trait::async_trait;
use axum_helpers::Pagination;
use chrono::{DateTime, Utc};
use database::mongodb::{timestamp, uuid_array, uuid_bson};
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::ReservationResult;
use crate::models::{NewReservation, Reservation, ReservationCriteria, ReservationStatus};
use crate::repository::ReservationRepository;

pub struct MongoReservationRepository {
    collection: Collection<Reservation>,
}

impl MongoReservationRepository {
    pub const COLLECTION: &'static str = "reservations";

    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Reservation>(Self::COLLECTION);
        Self { collection }
    }

    pub async fn init_indexes(&self) -> ReservationResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "roomNumber": 1, "checkIn": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_room_check_in".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "status": 1, "checkIn": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_status_check_in".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "guestId": 1 })
                .options(IndexOptions::builder().name("idx_guest".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Reservation indexes created successfully");
        Ok(())
    }

    /// `[start, end)` overlap with a stay: it starts before `end` and ends after `start`
    fn overlap_filter(start: &DateTime<Utc>, end: &DateTime<Utc>) -> Document {
        doc! {
            "checkIn": { "$lt": timestamp::format(end) },
            "checkOut": { "$gt": timestamp::format(start) },
            "status": { "$in": ReservationStatus::blocking_names() },
        }
    }

    fn build_filter(criteria: &ReservationCriteria) -> Document {
        let mut filter = doc! {};

        if let Some(status) = criteria.status {
            filter.insert("status", status.to_string());
        }
        if let Some(room_number) = criteria.room_number {
            filter.insert("roomNumber", room_number);
        }
        if let Some(guest_id) = criteria.guest_id {
            filter.insert("guestId", uuid_bson(&guest_id));
        }

        filter
    }

    /// Matches the reservation only while its paid total and status are as read
    fn balance_guard(reservation: &Reservation) -> Document {
        doc! {
            "_id": uuid_bson(&reservation.id),
            "totalPaid": reservation.total_paid,
            "status": reservation.status.to_string(),
        }
    }

    fn balance_update(reservation: &Reservation) -> Document {
        doc! {
            "$set": {
                "totalPaid": reservation.total_paid,
                "balanceDue": reservation.balance_due,
                "status": reservation.status.to_string(),
                "updatedAt": timestamp::format(&reservation.updated_at),
            }
        }
    }

    async fn find_sorted(
        &self,
        filter: Document,
        options: FindOptions,
    ) -> ReservationResult<Vec<Reservation>> {
        let cursor = self.collection.find(filter).with_options(options).await?;
        let reservations: Vec<Reservation> = cursor.try_collect().await?;
        Ok(reservations)
    }
}

#[async_trait]
impl ReservationRepository for MongoReservationRepository {
    #[instrument(skip(self, input), fields(room_number = input.room_number))]
    async fn create(&self, input: NewReservation) -> ReservationResult<Reservation> {
        let reservation = Reservation::new(input);

        self.collection.insert_one(&reservation).await?;

        tracing::info!(
            reservation_id = %reservation.id,
            room_number = reservation.room_number,
            "Reservation created successfully"
        );
        Ok(reservation)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ReservationResult<Option<Reservation>> {
        let reservation = self
            .collection
            .find_one(doc! { "_id": uuid_bson(&id) })
            .await?;
        Ok(reservation)
    }

    #[instrument(skip(self))]
    async fn get_by_ids(&self, ids: Vec<Uuid>) -> ReservationResult<Vec<Reservation>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": uuid_array(&ids) } })
            .await?;
        let reservations: Vec<Reservation> = cursor.try_collect().await?;
        Ok(reservations)
    }

    #[instrument(skip(self))]
    async fn find_overlapping(
        &self,
        room_number: i32,
        check_in: DateTime<Utc>,
        check_out: DateTime<Utc>,
        exclude: Option<Uuid>,
    ) -> ReservationResult<Option<Reservation>> {
        let mut filter = Self::overlap_filter(&check_in, &check_out);
        filter.insert("roomNumber", room_number);
        if let Some(id) = exclude {
            filter.insert("_id", doc! { "$ne": uuid_bson(&id) });
        }

        let reservation = self.collection.find_one(filter).await?;
        Ok(reservation)
    }

    #[instrument(skip(self))]
    async fn find_active_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ReservationResult<Vec<Reservation>> {
        let options = FindOptions::builder()
            .sort(doc! { "roomNumber": 1 })
            .build();
        self.find_sorted(Self::overlap_filter(&start, &end), options)
            .await
    }

    #[instrument(skip(self))]
    async fn list_by_room(&self, room_number: i32) -> ReservationResult<Vec<Reservation>> {
        let options = FindOptions::builder().sort(doc! { "checkIn": 1 }).build();
        self.find_sorted(doc! { "roomNumber": room_number }, options)
            .await
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        criteria: ReservationCriteria,
        pagination: Pagination,
    ) -> ReservationResult<Vec<Reservation>> {
        let options = FindOptions::builder()
            .limit(pagination.limit_i64())
            .skip(pagination.skip())
            .sort(doc! { "checkIn": -1 })
            .build();
        self.find_sorted(Self::build_filter(&criteria), options)
            .await
    }

    #[instrument(skip(self))]
    async fn count(&self, criteria: ReservationCriteria) -> ReservationResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(&criteria))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn update_status(
        &self,
        id: Uuid,
        status: ReservationStatus,
    ) -> ReservationResult<Option<Reservation>> {
        let update = doc! {
            "$set": {
                "status": status.to_string(),
                "updatedAt": timestamp::format(&Utc::now()),
            }
        };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let reservation = self
            .collection
            .find_one_and_update(doc! { "_id": uuid_bson(&id) }, update)
            .with_options(options)
            .await?;

        if reservation.is_some() {
            tracing::info!(reservation_id = %id, %status, "Reservation status updated");
        }
        Ok(reservation)
    }

    #[instrument(skip(self, reservation), fields(reservation_id = %reservation.id))]
    async fn apply_payment(
        &self,
        reservation: Reservation,
        amount: f64,
    ) -> ReservationResult<Option<Reservation>> {
        let filter = Self::balance_guard(&reservation);
        let mut updated = reservation;
        updated.apply_payment(amount);

        let result = self
            .collection
            .update_one(filter, Self::balance_update(&updated))
            .await?;

        if result.matched_count == 0 {
            tracing::warn!(
                reservation_id = %updated.id,
                "Reservation changed since it was read, payment not applied"
            );
            return Ok(None);
        }

        tracing::info!(
            reservation_id = %updated.id,
            total_paid = updated.total_paid,
            balance_due = updated.balance_due,
            "Reservation balance updated"
        );
        Ok(Some(updated))
    }
}
