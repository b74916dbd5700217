//! MongoDB implementation of ReportRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use database::mongodb::{bson_f64, bson_i64, timestamp};
use domain_payments::MongoPaymentRepository;
use domain_reservations::{MongoReservationRepository, ReservationStatus, round_cents};
use domain_rooms::MongoRoomRepository;
use futures::TryStreamExt;
use mongodb::{
    Database,
    bson::{Document, doc},
    options::FindOptions,
};
use tracing::instrument;

use crate::error::ReportResult;
use crate::models::{RoomIncome, StayWindow};
use crate::repository::ReportRepository;

/// Statuses whose nights count towards occupancy
const OCCUPIED: [ReservationStatus; 2] = [ReservationStatus::Confirmed, ReservationStatus::Completed];

pub struct MongoReportRepository {
    db: Database,
}

impl MongoReportRepository {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    fn stays_filter(start: &DateTime<Utc>, end: &DateTime<Utc>) -> Document {
        let statuses: Vec<String> = OCCUPIED.iter().map(ToString::to_string).collect();
        doc! {
            "status": { "$in": statuses },
            "checkIn": { "$lt": timestamp::format(end) },
            "checkOut": { "$gt": timestamp::format(start) },
        }
    }

    fn check_ins_filter(
        start: &DateTime<Utc>,
        end: &DateTime<Utc>,
        status: Option<ReservationStatus>,
    ) -> Document {
        let mut filter = doc! {
            "checkIn": {
                "$gte": timestamp::format(start),
                "$lt": timestamp::format(end),
            },
        };
        if let Some(status) = status {
            filter.insert("status", status.to_string());
        }
        filter
    }

    fn income_pipeline(start: &DateTime<Utc>, end: &DateTime<Utc>) -> Vec<Document> {
        vec![
            doc! {
                "$match": {
                    "paidAt": {
                        "$gte": timestamp::format(start),
                        "$lt": timestamp::format(end),
                    }
                }
            },
            doc! {
                "$lookup": {
                    "from": MongoReservationRepository::COLLECTION,
                    "localField": "reservationId",
                    "foreignField": "_id",
                    "as": "reservation",
                }
            },
            doc! { "$unwind": "$reservation" },
            doc! {
                "$group": {
                    "_id": "$reservation.roomNumber",
                    "totalIncome": { "$sum": "$amount" },
                    "paymentsCount": { "$sum": 1 },
                }
            },
            doc! { "$sort": { "_id": 1 } },
        ]
    }

    fn room_income(group: &Document) -> RoomIncome {
        RoomIncome {
            room_number: i32::try_from(bson_i64(group.get("_id"))).unwrap_or_default(),
            total_income: round_cents(bson_f64(group.get("totalIncome"))),
            payments_count: u64::try_from(bson_i64(group.get("paymentsCount")))
                .unwrap_or_default(),
        }
    }
}

#[async_trait]
impl ReportRepository for MongoReportRepository {
    #[instrument(skip(self))]
    async fn count_rooms(&self) -> ReportResult<u64> {
        let count = self
            .db
            .collection::<Document>(MongoRoomRepository::COLLECTION)
            .count_documents(doc! {})
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn booked_stays(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ReportResult<Vec<StayWindow>> {
        let options = FindOptions::builder()
            .projection(doc! { "_id": 0, "checkIn": 1, "checkOut": 1 })
            .build();

        let cursor = self
            .db
            .collection::<StayWindow>(MongoReservationRepository::COLLECTION)
            .find(Self::stays_filter(&start, &end))
            .with_options(options)
            .await?;
        let stays: Vec<StayWindow> = cursor.try_collect().await?;
        Ok(stays)
    }

    #[instrument(skip(self))]
    async fn income_by_room(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ReportResult<Vec<RoomIncome>> {
        let cursor = self
            .db
            .collection::<Document>(MongoPaymentRepository::COLLECTION)
            .aggregate(Self::income_pipeline(&start, &end))
            .await?;
        let groups: Vec<Document> = cursor.try_collect().await?;
        Ok(groups.iter().map(Self::room_income).collect())
    }

    #[instrument(skip(self))]
    async fn count_check_ins(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        status: Option<ReservationStatus>,
    ) -> ReportResult<u64> {
        let count = self
            .db
            .collection::<Document>(MongoReservationRepository::COLLECTION)
            .count_documents(Self::check_ins_filter(&start, &end, status))
            .await?;
        Ok(count)
    }
}
