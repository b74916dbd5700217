use chrono::{DateTime, Duration, Utc};
use domain_rooms::Room;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::error::{ReservationError, ReservationResult};

/// Round a money amount to cents
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn to_cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// Reservation lifecycle status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    /// Statuses that hold the room for their dates
    pub const BLOCKING: [ReservationStatus; 3] = [
        ReservationStatus::Pending,
        ReservationStatus::Confirmed,
        ReservationStatus::CheckedIn,
    ];

    pub fn blocks_room(&self) -> bool {
        Self::BLOCKING.contains(self)
    }

    /// Room availability implied by moving into this status, if any
    pub fn room_availability(&self) -> Option<bool> {
        match self {
            ReservationStatus::CheckedIn => Some(false),
            ReservationStatus::CheckedOut
            | ReservationStatus::Completed
            | ReservationStatus::Cancelled => Some(true),
            ReservationStatus::Pending | ReservationStatus::Confirmed => None,
        }
    }

    pub fn blocking_names() -> Vec<String> {
        Self::BLOCKING.iter().map(ToString::to_string).collect()
    }
}

/// Reservation entity - a room booked for a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Registered guest, when the booking was made for one
    #[serde(default)]
    pub guest_id: Option<Uuid>,
    pub room_number: i32,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    #[serde(with = "database::mongodb::timestamp")]
    pub check_in: DateTime<Utc>,
    #[serde(with = "database::mongodb::timestamp")]
    pub check_out: DateTime<Utc>,
    pub number_of_guests: i32,
    pub total_price: f64,
    #[serde(default)]
    pub total_paid: f64,
    pub balance_due: f64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(with = "database::mongodb::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "database::mongodb::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn new(input: NewReservation) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            guest_id: input.guest_id,
            room_number: input.room_number,
            guest_name: input.guest_name,
            guest_email: input.guest_email,
            guest_phone: input.guest_phone,
            check_in: input.check_in,
            check_out: input.check_out,
            number_of_guests: input.number_of_guests,
            total_price: input.total_price,
            total_paid: 0.0,
            balance_due: input.total_price,
            notes: input.notes,
            status: ReservationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether a payment of `amount` would go beyond the outstanding balance
    pub fn exceeds_balance(&self, amount: f64) -> bool {
        to_cents(amount) > to_cents(self.balance_due)
    }

    /// Record a payment on the running totals.
    ///
    /// A pending reservation that is paid in full becomes confirmed.
    pub fn apply_payment(&mut self, amount: f64) {
        self.total_paid = round_cents(self.total_paid + amount);
        self.balance_due = round_cents((self.total_price - self.total_paid).max(0.0));
        if self.balance_due == 0.0 && self.status == ReservationStatus::Pending {
            self.status = ReservationStatus::Confirmed;
        }
        self.updated_at = Utc::now();
    }
}

/// Calendar nights between two instants, counted on UTC dates
pub fn nights_between(check_in: DateTime<Utc>, check_out: DateTime<Utc>) -> i64 {
    (check_out.date_naive() - check_in.date_naive()).num_days()
}

/// `[00:00, +1 day)` of the UTC day containing `now`
pub fn day_window(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = now.date_naive().and_time(chrono::NaiveTime::MIN).and_utc();
    (start, start + Duration::days(1))
}

/// Request body for booking a room
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReservation {
    pub room_number: i32,
    /// ISO 8601 date or date-time
    pub check_in: Option<String>,
    /// ISO 8601 date or date-time
    pub check_out: Option<String>,
    pub guest_name: Option<String>,
    pub guest_email: Option<String>,
    pub guest_phone: Option<String>,
    pub guest_id: Option<Uuid>,
    /// Defaults to 1
    pub number_of_guests: Option<i32>,
    /// Defaults to nights × room price
    pub total_price: Option<f64>,
    pub notes: Option<String>,
}

impl CreateReservation {
    /// Parsed `(check_in, check_out)`; check-in must come first
    pub fn stay(&self) -> ReservationResult<(DateTime<Utc>, DateTime<Utc>)> {
        let parse = |value: &Option<String>| {
            value
                .as_deref()
                .and_then(database::mongodb::timestamp::parse)
                .ok_or(ReservationError::InvalidDates)
        };

        let check_in = parse(&self.check_in)?;
        let check_out = parse(&self.check_out)?;
        if check_in >= check_out {
            return Err(ReservationError::InvalidDates);
        }
        Ok((check_in, check_out))
    }
}

/// Fully resolved reservation ready to be stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewReservation {
    pub guest_id: Option<Uuid>,
    pub room_number: i32,
    pub guest_name: String,
    pub guest_email: String,
    pub guest_phone: String,
    pub check_in: DateTime<Utc>,
    pub check_out: DateTime<Utc>,
    pub number_of_guests: i32,
    pub total_price: f64,
    pub notes: String,
}

/// Body of the status endpoint
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct StatusUpdate {
    /// One of `pending`, `confirmed`, `checked-in`, `checked-out`, `cancelled`, `completed`
    pub status: Option<String>,
}

/// Query parameters for listing reservations
#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReservationFilter {
    pub status: Option<String>,
    pub room_number: Option<String>,
    pub guest_id: Option<String>,
    /// Page number (default 1)
    pub page: Option<String>,
    /// Page size (default 20)
    pub limit: Option<String>,
}

impl ReservationFilter {
    pub const DEFAULT_LIMIT: u64 = 20;

    /// Typed criteria; malformed values are rejected rather than ignored
    pub fn criteria(&self) -> ReservationResult<ReservationCriteria> {
        let present = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let status = present(&self.status)
            .map(|s| s.parse::<ReservationStatus>())
            .transpose()
            .map_err(|_| ReservationError::InvalidStatus)?;

        let room_number = present(&self.room_number)
            .map(|n| n.parse::<i32>())
            .transpose()
            .map_err(|_| ReservationError::Validation("Invalid roomNumber".to_string()))?;

        let guest_id = present(&self.guest_id)
            .map(|id| Uuid::parse_str(&id))
            .transpose()
            .map_err(|_| ReservationError::Validation("Invalid guestId".to_string()))?;

        Ok(ReservationCriteria {
            status,
            room_number,
            guest_id,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReservationCriteria {
    pub status: Option<ReservationStatus>,
    pub room_number: Option<i32>,
    pub guest_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationMessage {
    pub message: String,
    pub reservation: Reservation,
}

/// Rooms free today and the reservations holding the others
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityOverview {
    pub available_rooms: Vec<Room>,
    pub reserved_rooms: Vec<Reservation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllRooms {
    pub all_rooms: Vec<Room>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RoomReservations {
    pub reservations: Vec<Reservation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationPage {
    pub count: usize,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
    pub results: Vec<Reservation>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn reservation(total_price: f64) -> Reservation {
        Reservation::new(NewReservation {
            guest_id: None,
            room_number: 101,
            guest_name: "Ana López".to_string(),
            guest_email: "ana@correo.mx".to_string(),
            guest_phone: "7440000000".to_string(),
            check_in: at(2024, 3, 1, 15),
            check_out: at(2024, 3, 4, 12),
            number_of_guests: 2,
            total_price,
            notes: String::new(),
        })
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(ReservationStatus::CheckedIn.to_string(), "checked-in");
        assert_eq!(
            "checked-out".parse::<ReservationStatus>().unwrap(),
            ReservationStatus::CheckedOut
        );
        assert_eq!(
            serde_json::to_value(ReservationStatus::Cancelled).unwrap(),
            "cancelled"
        );
        assert!("checked_in".parse::<ReservationStatus>().is_err());
    }

    #[test]
    fn test_blocking_statuses() {
        assert!(ReservationStatus::Pending.blocks_room());
        assert!(ReservationStatus::Confirmed.blocks_room());
        assert!(ReservationStatus::CheckedIn.blocks_room());
        assert!(!ReservationStatus::CheckedOut.blocks_room());
        assert!(!ReservationStatus::Cancelled.blocks_room());
        assert!(!ReservationStatus::Completed.blocks_room());
        assert_eq!(
            ReservationStatus::blocking_names(),
            vec!["pending", "confirmed", "checked-in"]
        );
    }

    #[test]
    fn test_room_availability_side_effects() {
        assert_eq!(ReservationStatus::CheckedIn.room_availability(), Some(false));
        assert_eq!(ReservationStatus::CheckedOut.room_availability(), Some(true));
        assert_eq!(ReservationStatus::Cancelled.room_availability(), Some(true));
        assert_eq!(ReservationStatus::Confirmed.room_availability(), None);
    }

    #[test]
    fn test_new_reservation_starts_unpaid() {
        let r = reservation(3000.0);
        assert_eq!(r.status, ReservationStatus::Pending);
        assert_eq!(r.total_paid, 0.0);
        assert_eq!(r.balance_due, 3000.0);
    }

    #[test]
    fn test_partial_payment_keeps_pending() {
        let mut r = reservation(3000.0);
        r.apply_payment(1000.10);
        assert_eq!(r.total_paid, 1000.1);
        assert_eq!(r.balance_due, 1999.9);
        assert_eq!(r.status, ReservationStatus::Pending);
    }

    #[test]
    fn test_full_payment_confirms() {
        let mut r = reservation(100.3);
        r.apply_payment(100.1);
        r.apply_payment(0.2);
        assert_eq!(r.total_paid, 100.3);
        assert_eq!(r.balance_due, 0.0);
        assert_eq!(r.status, ReservationStatus::Confirmed);
    }

    #[test]
    fn test_full_payment_keeps_checked_in() {
        let mut r = reservation(500.0);
        r.status = ReservationStatus::CheckedIn;
        r.apply_payment(500.0);
        assert_eq!(r.status, ReservationStatus::CheckedIn);
    }

    #[test]
    fn test_exceeds_balance_in_cents() {
        let mut r = reservation(0.3);
        r.balance_due = 0.1 + 0.2;
        assert!(!r.exceeds_balance(0.3));
        assert!(r.exceeds_balance(0.31));
    }

    #[test]
    fn test_nights_between_uses_calendar_days() {
        assert_eq!(nights_between(at(2024, 3, 1, 15), at(2024, 3, 4, 12)), 3);
        assert_eq!(nights_between(at(2024, 3, 1, 8), at(2024, 3, 1, 20)), 0);
        assert_eq!(nights_between(at(2024, 2, 28, 23), at(2024, 3, 1, 1)), 2);
    }

    #[test]
    fn test_day_window() {
        let (start, end) = day_window(at(2024, 5, 10, 17));
        assert_eq!(start, at(2024, 5, 10, 0));
        assert_eq!(end, at(2024, 5, 11, 0));
    }

    #[test]
    fn test_stay_parsing() {
        let body = CreateReservation {
            check_in: Some("2024-03-01".to_string()),
            check_out: Some("2024-03-03T12:00:00Z".to_string()),
            ..Default::default()
        };
        let (check_in, check_out) = body.stay().unwrap();
        assert_eq!(check_in, at(2024, 3, 1, 0));
        assert_eq!(check_out, at(2024, 3, 3, 12));

        let reversed = CreateReservation {
            check_in: Some("2024-03-03".to_string()),
            check_out: Some("2024-03-01".to_string()),
            ..Default::default()
        };
        assert!(matches!(reversed.stay(), Err(ReservationError::InvalidDates)));

        let garbage = CreateReservation {
            check_in: Some("tomorrow".to_string()),
            check_out: Some("2024-03-01".to_string()),
            ..Default::default()
        };
        assert!(matches!(garbage.stay(), Err(ReservationError::InvalidDates)));
    }

    #[test]
    fn test_filter_criteria() {
        let filter = ReservationFilter {
            status: Some("checked-in".to_string()),
            room_number: Some("204".to_string()),
            ..Default::default()
        };
        let criteria = filter.criteria().unwrap();
        assert_eq!(criteria.status, Some(ReservationStatus::CheckedIn));
        assert_eq!(criteria.room_number, Some(204));
        assert_eq!(criteria.guest_id, None);

        let bad = ReservationFilter {
            status: Some("lost".to_string()),
            ..Default::default()
        };
        assert!(matches!(bad.criteria(), Err(ReservationError::InvalidStatus)));

        let bad = ReservationFilter {
            guest_id: Some("123".to_string()),
            ..Default::default()
        };
        assert!(matches!(bad.criteria(), Err(ReservationError::Validation(_))));
    }
}
