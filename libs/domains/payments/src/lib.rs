//! Payments Domain
//!
//! Payments taken against reservations (`efectivo`, `tdd`, `tdc`). Registering
//! a payment updates the reservation's `totalPaid` and `balanceDue`, and a
//! pending reservation that is paid in full becomes confirmed.
//!
//! Responses embed reservation and guest summaries, resolved with one batch
//! lookup per collection.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use self::mongodb::MongoPaymentRepository;
pub use error::{PaymentError, PaymentResult};
pub use handlers::ApiDoc;
pub use models::{
    GuestSummary, NewPayment, Payment, PaymentCriteria, PaymentDetails, PaymentFilter,
    PaymentMethod, PaymentPage, PaymentRegistered, RegisterPayment, ReservationPayments,
    ReservationSummary,
};
#[cfg(any(test, feature = "mock"))]
pub use repository::MockPaymentRepository;
pub use repository::PaymentRepository;
pub use service::PaymentService;
