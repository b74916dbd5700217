//! MongoDB implementation of PaymentRepository

use async_trait::async_trait;
use axum_helpers::Pagination;
use database::mongodb::{bson_f64, timestamp, uuid_bson};
use futures::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{Document, doc},
    options::{FindOptions, IndexOptions},
};
use tracing::instrument;
use uuid::Uuid;

use crate::error::PaymentResult;
use crate::models::{NewPayment, Payment, PaymentCriteria};
use crate::repository::PaymentRepository;

pub struct MongoPaymentRepository {
    collection: Collection<Payment>,
}

impl MongoPaymentRepository {
    pub const COLLECTION: &'static str = "payments";

    pub fn new(db: &Database) -> Self {
        let collection = db.collection::<Payment>(Self::COLLECTION);
        Self { collection }
    }

    pub async fn init_indexes(&self) -> PaymentResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "paidAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_paid_at".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "reservationId": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_reservation".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "guestId": 1 })
                .options(IndexOptions::builder().name("idx_guest".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Payment indexes created successfully");
        Ok(())
    }

    fn build_filter(criteria: &PaymentCriteria) -> Document {
        let mut filter = doc! {};

        if let Some(reservation_id) = criteria.reservation_id {
            filter.insert("reservationId", uuid_bson(&reservation_id));
        }
        if let Some(guest_id) = criteria.guest_id {
            filter.insert("guestId", uuid_bson(&guest_id));
        }
        if let Some(method) = criteria.method {
            filter.insert("method", method.to_string());
        }

        let mut paid_at = doc! {};
        if let Some(start) = criteria.start {
            paid_at.insert("$gte", timestamp::format(&start));
        }
        if let Some(end) = criteria.end {
            paid_at.insert("$lte", timestamp::format(&end));
        }
        if !paid_at.is_empty() {
            filter.insert("paidAt", paid_at);
        }

        filter
    }

    fn total_pipeline(filter: Document) -> Vec<Document> {
        vec![
            doc! { "$match": filter },
            doc! { "$group": { "_id": null, "totalAmount": { "$sum": "$amount" } } },
        ]
    }
}

#[async_trait]
impl PaymentRepository for MongoPaymentRepository {
    #[instrument(skip(self, input), fields(reservation_id = %input.reservation_id))]
    async fn create(&self, input: NewPayment) -> PaymentResult<Payment> {
        let payment = Payment::new(input);

        self.collection.insert_one(&payment).await?;

        tracing::info!(
            payment_id = %payment.id,
            amount = payment.amount,
            method = %payment.method,
            "Payment registered successfully"
        );
        Ok(payment)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> PaymentResult<Option<Payment>> {
        let payment = self
            .collection
            .find_one(doc! { "_id": uuid_bson(&id) })
            .await?;
        Ok(payment)
    }

    #[instrument(skip(self))]
    async fn list(
        &self,
        criteria: PaymentCriteria,
        pagination: Pagination,
        ascending: bool,
    ) -> PaymentResult<Vec<Payment>> {
        let direction = if ascending { 1 } else { -1 };
        let options = FindOptions::builder()
            .limit(pagination.limit_i64())
            .skip(pagination.skip())
            .sort(doc! { "paidAt": direction })
            .build();

        let cursor = self
            .collection
            .find(Self::build_filter(&criteria))
            .with_options(options)
            .await?;
        let payments: Vec<Payment> = cursor.try_collect().await?;
        Ok(payments)
    }

    #[instrument(skip(self))]
    async fn count(&self, criteria: PaymentCriteria) -> PaymentResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(&criteria))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self))]
    async fn total_amount(&self, criteria: PaymentCriteria) -> PaymentResult<f64> {
        let mut cursor = self
            .collection
            .aggregate(Self::total_pipeline(Self::build_filter(&criteria)))
            .await?;

        let total = cursor
            .try_next()
            .await?
            .map(|group| bson_f64(group.get("totalAmount")))
            .unwrap_or(0.0);
        Ok(total)
    }

    #[instrument(skip(self))]
    async fn list_by_reservation(&self, reservation_id: Uuid) -> PaymentResult<Vec<Payment>> {
        let options = FindOptions::builder().sort(doc! { "paidAt": -1 }).build();

        let cursor = self
            .collection
            .find(doc! { "reservationId": uuid_bson(&reservation_id) })
            .with_options(options)
            .await?;
        let payments: Vec<Payment> = cursor.try_collect().await?;
        Ok(payments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_build_filter_empty() {
        let doc = MongoPaymentRepository::build_filter(&PaymentCriteria::default());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_date_range_is_inclusive() {
        let criteria = PaymentCriteria {
            start: Some(Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()),
            end: Some(Utc.with_ymd_and_hms(2024, 4, 30, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        let doc = MongoPaymentRepository::build_filter(&criteria);
        let paid_at = doc.get_document("paidAt").unwrap();
        assert_eq!(paid_at.get_str("$gte").unwrap(), "2024-04-01T00:00:00.000Z");
        assert_eq!(paid_at.get_str("$lte").unwrap(), "2024-04-30T00:00:00.000Z");
    }

    #[test]
    fn test_build_filter_only_end_date() {
        let criteria = PaymentCriteria {
            end: Some(Utc.with_ymd_and_hms(2024, 4, 30, 0, 0, 0).unwrap()),
            ..Default::default()
        };
        let doc = MongoPaymentRepository::build_filter(&criteria);
        let paid_at = doc.get_document("paidAt").unwrap();
        assert!(!paid_at.contains_key("$gte"));
        assert!(paid_at.contains_key("$lte"));
    }

    #[test]
    fn test_build_filter_references_and_method() {
        let criteria = PaymentCriteria {
            reservation_id: Some(Uuid::now_v7()),
            guest_id: Some(Uuid::now_v7()),
            method: Some(PaymentMethod::DebitCard),
            ..Default::default()
        };
        let doc = MongoPaymentRepository::build_filter(&criteria);
        assert!(doc.contains_key("reservationId"));
        assert!(doc.contains_key("guestId"));
        assert_eq!(doc.get_str("method").unwrap(), "tdd");
    }

    #[test]
    fn test_total_pipeline_groups_everything() {
        let pipeline = MongoPaymentRepository::total_pipeline(doc! { "method": "tdc" });
        assert_eq!(pipeline.len(), 2);
        let group = pipeline[1].get_document("$group").unwrap();
        assert!(group.get("_id").unwrap().as_null().is_some());
        assert_eq!(
            group
                .get_document("totalAmount")
                .unwrap()
                .get_str("$sum")
                .unwrap(),
            "$amount"
        );
    }
}
