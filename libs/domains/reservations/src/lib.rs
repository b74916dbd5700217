//! Reservations Domain
//!
//! Room bookings over a `[checkIn, checkOut)` range, with overlap detection,
//! the reservation status lifecycle and the payment running totals.
//!
//! # Statuses
//!
//! ```text
//! pending ──► confirmed ──► checked-in ──► checked-out ──► completed
//!    │            │
//!    └────────────┴──► cancelled
//! ```
//!
//! `pending`, `confirmed` and `checked-in` hold the room for their dates.
//! Checking in marks the room unavailable; checking out, completing or
//! cancelling frees it. Any transition is accepted by the status endpoint.
//!
//! The service depends on [`domain_rooms::RoomRepository`] and
//! [`domain_guests::GuestRepository`]; the `mock` feature exports
//! [`MockReservationRepository`] for the payment service tests.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use self::mongodb::MongoReservationRepository;
pub use error::{ReservationError, ReservationResult};
pub use handlers::ApiDoc;
pub use models::{
    AllRooms, AvailabilityOverview, CreateReservation, NewReservation, Reservation,
    ReservationCriteria, ReservationFilter, ReservationMessage, ReservationPage, ReservationStatus,
    RoomReservations, StatusUpdate, day_window, nights_between, round_cents,
};
#[cfg(any(test, feature = "mock"))]
pub use repository::MockReservationRepository;
pub use repository::ReservationRepository;
pub use service::ReservationService;
