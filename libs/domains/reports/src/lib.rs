//! Reports Domain
//!
//! Monthly management report over the rooms, reservations and payments
//! collections:
//!
//! - occupancy: booked room-nights of confirmed and completed stays against
//!   `rooms × days in month`
//! - income: payments of the month grouped by room
//! - cancellations: share of the month's check-ins that were cancelled
//!
//! The repository only reads; it owns no collection and creates no indexes.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

pub use self::mongodb::MongoReportRepository;
pub use error::{ReportError, ReportResult};
pub use handlers::ApiDoc;
pub use models::{
    Cancellations, Income, MonthWindow, MonthlyReport, Occupancy, ReportPeriod, ReportQuery,
    RoomIncome, StayWindow, month_window, percentage,
};
#[cfg(any(test, feature = "mock"))]
pub use repository::MockReportRepository;
pub use repository::ReportRepository;
pub use service::ReportService;
