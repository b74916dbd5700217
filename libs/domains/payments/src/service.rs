//! Payment Service - registration rules and populated payment views

use axum_helpers::{Pagination, is_ascending};
use domain_guests::{Guest, GuestRepository};
use domain_reservations::{Reservation, ReservationRepository, ReservationStatus, round_cents};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{PaymentError, PaymentResult};
use crate::models::{
    GuestSummary, NewPayment, Payment, PaymentDetails, PaymentFilter, PaymentPage,
    PaymentRegistered, RegisterPayment, ReservationPayments, ReservationSummary,
};
use crate::repository::PaymentRepository;

pub struct PaymentService<P, V, G>
where
    P: PaymentRepository,
    V: ReservationRepository,
    G: GuestRepository,
{
    repository: Arc<P>,
    reservations: Arc<V>,
    guests: Arc<G>,
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

impl<P, V, G> PaymentService<P, V, G>
where
    P: PaymentRepository,
    V: ReservationRepository,
    G: GuestRepository,
{
    pub fn new(repository: P, reservations: V, guests: G) -> Self {
        Self {
            repository: Arc::new(repository),
            reservations: Arc::new(reservations),
            guests: Arc::new(guests),
        }
    }

    const BALANCE_ATTEMPTS: usize = 3;

    /// Reservation that can take a payment of `amount`
    async fn payable_reservation(&self, id: Uuid, amount: f64) -> PaymentResult<Reservation> {
        let reservation = self
            .reservations
            .get_by_id(id)
            .await?
            .ok_or(PaymentError::ReservationNotFound(id))?;

        if reservation.status == ReservationStatus::Cancelled {
            return Err(PaymentError::CancelledReservation);
        }
        if reservation.exceeds_balance(amount) {
            return Err(PaymentError::ExceedsBalance(reservation.balance_due));
        }
        Ok(reservation)
    }

    /// Register a payment and apply it to the reservation balance
    #[instrument(skip(self, input))]
    pub async fn register_payment(
        &self,
        input: RegisterPayment,
    ) -> PaymentResult<PaymentRegistered> {
        let request = input.request()?;

        let mut reservation = self
            .payable_reservation(request.reservation_id, request.amount)
            .await?;
        let paid_at = input.paid_at()?;

        let mut attempts = 1;
        let reservation = loop {
            if let Some(updated) = self
                .reservations
                .apply_payment(reservation, request.amount)
                .await?
            {
                break updated;
            }
            if attempts == Self::BALANCE_ATTEMPTS {
                return Err(PaymentError::BalanceConflict);
            }
            attempts += 1;
            reservation = self
                .payable_reservation(request.reservation_id, request.amount)
                .await?;
        };

        let payment = self
            .repository
            .create(NewPayment {
                reservation_id: reservation.id,
                guest_id: reservation.guest_id,
                amount: request.amount,
                method: request.method,
                reference: trimmed(input.reference),
                notes: trimmed(input.notes),
                recorded_by: trimmed(input.recorded_by),
                paid_at,
            })
            .await
            .inspect_err(|e| {
                tracing::error!(
                    reservation_id = %reservation.id,
                    amount = request.amount,
                    error = %e,
                    "Balance applied but payment record not stored"
                );
            })?;

        let guest = match reservation.guest_id {
            Some(guest_id) => self.guests.get_by_id(guest_id).await?,
            None => None,
        };

        let payment = PaymentDetails {
            payment,
            reservation: Some(ReservationSummary::from(&reservation)),
            guest: guest.as_ref().map(GuestSummary::from),
        };

        Ok(PaymentRegistered {
            message: "Payment registered successfully".to_string(),
            payment,
            reservation,
        })
    }

    #[instrument(skip(self))]
    pub async fn list_payments(&self, filter: PaymentFilter) -> PaymentResult<PaymentPage> {
        let criteria = filter.criteria()?;
        let pagination = Pagination::from_query(
            filter.page.as_deref(),
            filter.limit.as_deref(),
            PaymentFilter::DEFAULT_LIMIT,
        );
        let ascending = is_ascending(filter.order.as_deref());

        let total = self.repository.count(criteria.clone()).await?;
        let total_amount = self.repository.total_amount(criteria.clone()).await?;
        let payments = self
            .repository
            .list(criteria, pagination, ascending)
            .await?;
        let results = self.populate(payments).await?;

        Ok(PaymentPage {
            count: results.len(),
            total,
            total_pages: pagination.total_pages(total),
            page: pagination.page,
            total_amount: round_cents(total_amount),
            results,
        })
    }

    #[instrument(skip(self))]
    pub async fn get_payment(&self, id: Uuid) -> PaymentResult<PaymentDetails> {
        let payment = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(PaymentError::NotFound(id))?;

        let mut details = self.populate(vec![payment]).await?;
        details.pop().ok_or(PaymentError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn payments_for_reservation(
        &self,
        reservation_id: Uuid,
    ) -> PaymentResult<ReservationPayments> {
        let payments = self.repository.list_by_reservation(reservation_id).await?;
        let total_amount = round_cents(payments.iter().map(|p| p.amount).sum());
        let results = self.populate(payments).await?;

        Ok(ReservationPayments {
            count: results.len(),
            total_amount,
            results,
        })
    }

    /// Attach reservation and guest summaries, two lookups per batch
    async fn populate(&self, payments: Vec<Payment>) -> PaymentResult<Vec<PaymentDetails>> {
        let reservation_ids: Vec<Uuid> = payments
            .iter()
            .map(|p| p.reservation_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        let guest_ids: Vec<Uuid> = payments
            .iter()
            .filter_map(|p| p.guest_id)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let reservations: HashMap<Uuid, Reservation> = if reservation_ids.is_empty() {
            HashMap::new()
        } else {
            self.reservations
                .get_by_ids(reservation_ids)
                .await?
                .into_iter()
                .map(|r| (r.id, r))
                .collect()
        };
        let guests: HashMap<Uuid, Guest> = if guest_ids.is_empty() {
            HashMap::new()
        } else {
            self.guests
                .get_by_ids(guest_ids)
                .await?
                .into_iter()
                .map(|g| (g.id, g))
                .collect()
        };

        Ok(payments
            .into_iter()
            .map(|payment| PaymentDetails {
                reservation: reservations
                    .get(&payment.reservation_id)
                    .map(ReservationSummary::from),
                guest: payment
                    .guest_id
                    .and_then(|id| guests.get(&id))
                    .map(GuestSummary::from),
                payment,
            })
            .collect())
    }
}
